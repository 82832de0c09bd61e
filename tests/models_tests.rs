// Wire JSON shape of the outbound payload

use platform_agent::models::{
    AgentIdentity, AggregationState, ComponentSnapshot, MetricSnapshot, Payload,
};
use std::collections::BTreeMap;

#[test]
fn payload_serializes_to_collector_shape() {
    let mut metrics = BTreeMap::new();
    metrics.insert("Component/a[x]".to_string(), MetricSnapshot::Scalar(2.5));
    metrics.insert(
        "Component/b[y]".to_string(),
        MetricSnapshot::Aggregate(AggregationState {
            min: 1.0,
            max: 2.0,
            total: 3.0,
            count: 2,
            sum_of_squares: 5.0,
        }),
    );
    let payload = Payload {
        agent: AgentIdentity::new("host-1", "0.1.0", 99),
        components: vec![ComponentSnapshot {
            name: "Db".to_string(),
            guid: "com.example.db".to_string(),
            duration: 60,
            metrics,
        }],
    };

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "agent": { "host": "host-1", "version": "0.1.0", "pid": 99 },
            "components": [{
                "name": "Db",
                "guid": "com.example.db",
                "duration": 60,
                "metrics": {
                    "Component/a[x]": 2.5,
                    "Component/b[y]": {
                        "min": 1.0, "max": 2.0, "total": 3.0, "count": 2, "sum_of_squares": 5.0
                    }
                }
            }]
        })
    );
}

#[test]
fn discovered_identity_uses_current_process() {
    let agent = AgentIdentity::discover("9.9.9");
    assert_eq!(agent.version, "9.9.9");
    assert_eq!(agent.pid, std::process::id());
    assert!(!agent.host.is_empty());
}

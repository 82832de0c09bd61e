// Outbound request body: agent identity plus one snapshot per component.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AgentIdentity, MetricSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub agent: AgentIdentity,
    pub components: Vec<ComponentSnapshot>,
}

/// Point-in-time view of one component. `duration` is whole seconds since the last flush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub name: String,
    pub guid: String,
    pub duration: u64,
    pub metrics: BTreeMap<String, MetricSnapshot>,
}

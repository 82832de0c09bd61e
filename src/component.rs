// A named group of metrics reported as one entry in the payload.
// Owns the aggregators and the duration accumulated since the last confirmed flush.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::aggregator::MetricAggregator;
use crate::error::CompositeError;
use crate::metric::{Metric, MetricKey};
use crate::models::ComponentSnapshot;

/// Segment used when a GUID part normalizes to nothing.
const EMPTY_SEGMENT: &str = "empty";

#[derive(Debug)]
pub struct Component {
    name: String,
    guid: Option<String>,
    duration: Duration,
    aggregators: HashMap<MetricKey, MetricAggregator>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: None,
            duration: Duration::ZERO,
            aggregators: HashMap::new(),
        }
    }

    /// Uses `guid` verbatim instead of deriving one at registration.
    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    /// Sets the derived GUID unless one was given explicitly.
    pub(crate) fn assign_guid(&mut self, namespace: &str, plugin: &str) {
        if self.guid.is_none() {
            self.guid = Some(generate_component_guid(namespace, plugin, &self.name));
        }
    }

    /// Time accumulated since the last flush.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Registers `metric` under its (name, units) key, replacing any previous one.
    pub fn add_metric<M>(&mut self, metric: M)
    where
        M: Metric + 'static,
    {
        let aggregator = MetricAggregator::new(Box::new(metric));
        self.aggregators.insert(aggregator.key().clone(), aggregator);
    }

    pub fn metric_count(&self) -> usize {
        self.aggregators.len()
    }

    pub fn aggregator(&self, key: &MetricKey) -> Option<&MetricAggregator> {
        self.aggregators.get(key)
    }

    pub fn aggregators(&self) -> impl Iterator<Item = &MetricAggregator> {
        self.aggregators.values()
    }

    /// Adds `elapsed` to the running duration and samples every metric.
    ///
    /// Metrics that fail are left out of the snapshot; their errors are returned alongside it.
    pub fn generate_snapshot(&mut self, elapsed: Duration) -> (ComponentSnapshot, CompositeError) {
        self.duration += elapsed;

        let mut metrics = BTreeMap::new();
        let mut errors = CompositeError::new();
        for (key, aggregator) in self.aggregators.iter_mut() {
            match aggregator.sample() {
                Ok(value) => {
                    metrics.insert(key.wire_key(), value);
                }
                Err(e) => errors.accumulate(e),
            }
        }

        let snapshot = ComponentSnapshot {
            name: self.name.clone(),
            guid: self.guid.clone().unwrap_or_default(),
            duration: self.duration.as_secs(),
            metrics,
        };
        (snapshot, errors)
    }

    /// Resets duration and every aggregator after a confirmed delivery.
    pub fn clear_state(&mut self) {
        self.duration = Duration::ZERO;
        for aggregator in self.aggregators.values_mut() {
            aggregator.clear();
        }
    }
}

/// `namespace.plugin.component`, each part normalized with [`normalize_guid_segment`].
pub fn generate_component_guid(namespace: &str, plugin: &str, component: &str) -> String {
    [namespace, plugin, component]
        .iter()
        .map(|s| normalize_guid_segment(s))
        .collect::<Vec<_>>()
        .join(".")
}

/// Lower-cases `raw` and collapses every run of characters outside `[A-Za-z0-9._]` into a
/// single `_`. Runs at either end are dropped; an empty result becomes `"empty"`.
pub fn normalize_guid_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() {
            pending_separator = true;
        }
    }
    if out.is_empty() {
        EMPTY_SEGMENT.to_string()
    } else {
        out
    }
}

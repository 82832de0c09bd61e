// Wire models posted to the collector

mod agent;
mod aggregation;
mod payload;

pub use agent::AgentIdentity;
pub use aggregation::{AggregationState, MetricSnapshot};
pub use payload::{ComponentSnapshot, Payload};

// Library for the agent binary and integration tests

pub mod aggregator;
pub mod component;
pub mod config;
pub mod error;
pub mod metric;
pub mod models;
pub mod session;
pub mod system_metrics;
pub mod transport;
pub mod version;
pub mod worker;

pub use component::Component;
pub use error::{AgentError, CompositeError};
pub use metric::{Metric, MetricKey, new_metric};
pub use session::{CycleOutcome, ReportingSession, SessionState};
pub use transport::{HttpTransport, SendStatus, Transport};

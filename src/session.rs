// Reporting session: one cycle builds the payload from every component, sends it, and
// flushes or retains the aggregation window depending on the collector's answer.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::component::Component;
use crate::error::CompositeError;
use crate::models::{AgentIdentity, Payload};
use crate::transport::{SendStatus, Transport};

/// Recommended poll interval (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Namespace prefix of derived component GUIDs.
pub const DEFAULT_GUID_NAMESPACE: &str = "com.platform.agent";

/// Where the session is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Building,
    Sending,
    FlushedAndReset,
    RetainedForRetry,
    /// Credential rejected; no further cycles.
    Halted,
}

/// What the caller should do after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Flushed,
    Retained(SendStatus),
    Halt,
}

impl CycleOutcome {
    pub fn is_halt(&self) -> bool {
        matches!(self, CycleOutcome::Halt)
    }
}

pub struct ReportingSession {
    name: String,
    guid_namespace: String,
    agent: AgentIdentity,
    poll_interval: Duration,
    components: Vec<Component>,
    transport: Arc<dyn Transport>,
    last_poll_time: Option<Instant>,
    state: SessionState,
    cycles: u64,
}

impl ReportingSession {
    pub fn new(name: impl Into<String>, agent: AgentIdentity, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            guid_namespace: DEFAULT_GUID_NAMESPACE.to_string(),
            agent,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            components: Vec::new(),
            transport,
            last_poll_time: None,
            state: SessionState::Idle,
            cycles: 0,
        }
    }

    /// Sets the cycle period. A zero period is ignored and the current one kept.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        if poll_interval.is_zero() {
            warn!(
                plugin = %self.name,
                kept_secs = self.poll_interval.as_secs(),
                "ignoring zero poll interval"
            );
        } else {
            self.poll_interval = poll_interval;
        }
        self
    }

    pub fn with_guid_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.guid_namespace = namespace.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agent(&self) -> &AgentIdentity {
        &self.agent
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of cycles that reached the transport.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn last_poll_time(&self) -> Option<Instant> {
        self.last_poll_time
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }

    /// Registers a component, deriving its GUID unless it carries one. Call before running.
    pub fn add_component(&mut self, mut component: Component) {
        component.assign_guid(&self.guid_namespace, &self.name);
        self.components.push(component);
    }

    /// Builds this cycle's payload. `last_poll_time` moves to `now` whatever happens next.
    pub fn build_payload(&mut self, now: Instant) -> (Payload, CompositeError) {
        self.state = SessionState::Building;
        let elapsed = match self.last_poll_time {
            Some(last) => now.saturating_duration_since(last),
            None => self.poll_interval,
        };
        self.last_poll_time = Some(now);

        let mut errors = CompositeError::new();
        let mut components = Vec::with_capacity(self.components.len());
        for component in self.components.iter_mut() {
            let (snapshot, component_errors) = component.generate_snapshot(elapsed);
            errors.merge(component_errors);
            components.push(snapshot);
        }

        let payload = Payload {
            agent: self.agent.clone(),
            components,
        };
        (payload, errors)
    }

    /// Runs one full cycle at `now`: build, send, apply the status policy.
    pub async fn run_cycle(&mut self, now: Instant) -> CycleOutcome {
        if self.state == SessionState::Halted {
            return CycleOutcome::Halt;
        }

        let (payload, errors) = self.build_payload(now);
        if !errors.is_empty() {
            warn!(
                plugin = %self.name,
                failed_metrics = errors.len(),
                error = %errors,
                "encountered error(s) creating request data"
            );
        }

        self.state = SessionState::Sending;
        let status = self.transport.send(&payload).await;
        self.cycles += 1;
        self.apply_status(status)
    }

    /// Flushes on success, retains on anything else, halts on a rejected credential.
    pub fn apply_status(&mut self, status: SendStatus) -> CycleOutcome {
        match status {
            SendStatus::Success => {
                for component in self.components.iter_mut() {
                    component.clear_state();
                }
                self.state = SessionState::FlushedAndReset;
                debug!(plugin = %self.name, "metrics delivered; aggregation window flushed");
                CycleOutcome::Flushed
            }
            SendStatus::Unauthorized => {
                error!(plugin = %self.name, %status, "collector rejected the license key");
                self.state = SessionState::Halted;
                CycleOutcome::Halt
            }
            other => {
                error!(
                    plugin = %self.name,
                    status = %other,
                    "collector did not accept metrics; keeping aggregation window for next cycle"
                );
                self.state = SessionState::RetainedForRetry;
                CycleOutcome::Retained(other)
            }
        }
    }

    /// Back to `Idle` between cycles; `Halted` is sticky.
    pub(crate) fn settle(&mut self) {
        if self.state != SessionState::Halted {
            self.state = SessionState::Idle;
        }
    }
}

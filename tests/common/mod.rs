// Shared test helpers: scripted metrics and a recording transport

#![allow(dead_code)]

use async_trait::async_trait;
use platform_agent::metric::{FnMetric, new_metric};
use platform_agent::models::{AgentIdentity, Payload};
use platform_agent::transport::{SendStatus, Transport};
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn test_agent() -> AgentIdentity {
    AgentIdentity::new("test-host", "0.0.1", 4242)
}

/// Returns `values` in order, then fails once they run out.
pub fn sequence_metric(
    name: &str,
    units: &str,
    values: Vec<f64>,
) -> FnMetric<impl FnMut() -> anyhow::Result<f64> + Send + use<>> {
    let mut values: VecDeque<f64> = values.into();
    new_metric(name, units, move || {
        values
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no more samples"))
    })
}

/// Returns 1.0, 2.0, 3.0, ...
pub fn counter_metric(
    name: &str,
    units: &str,
) -> FnMetric<impl FnMut() -> anyhow::Result<f64> + Send + use<>> {
    let mut i = 0.0;
    new_metric(name, units, move || {
        i += 1.0;
        Ok(i)
    })
}

pub fn constant_metric(
    name: &str,
    units: &str,
    value: f64,
) -> FnMetric<impl FnMut() -> anyhow::Result<f64> + Send + use<>> {
    new_metric(name, units, move || Ok(value))
}

pub fn failing_metric(
    name: &str,
    units: &str,
    message: &'static str,
) -> FnMetric<impl FnMut() -> anyhow::Result<f64> + Send + use<>> {
    new_metric(name, units, move || Err(anyhow::anyhow!(message)))
}

/// Answers with scripted statuses (then `fallback`) and keeps every payload it was given.
pub struct RecordingTransport {
    script: Mutex<VecDeque<SendStatus>>,
    fallback: SendStatus,
    sent: Mutex<Vec<Payload>>,
}

impl RecordingTransport {
    pub fn always(status: SendStatus) -> Self {
        Self::scripted(vec![], status)
    }

    pub fn scripted(script: Vec<SendStatus>, fallback: SendStatus) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Payload> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, payload: &Payload) -> SendStatus {
        self.sent.lock().unwrap().push(payload.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

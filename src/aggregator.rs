// Per-metric aggregation: pull one sample, fold it into the window, emit the shaped value.

use crate::metric::{Metric, MetricKey};
use crate::models::{AggregationState, MetricSnapshot};

pub struct MetricAggregator {
    key: MetricKey,
    metric: Box<dyn Metric>,
    state: AggregationState,
}

impl MetricAggregator {
    pub fn new(metric: Box<dyn Metric>) -> Self {
        Self {
            key: MetricKey::of(metric.as_ref()),
            metric,
            state: AggregationState::default(),
        }
    }

    pub fn key(&self) -> &MetricKey {
        &self.key
    }

    pub fn state(&self) -> &AggregationState {
        &self.state
    }

    /// Samples the metric once. A failed sample returns the error and leaves the window as it was.
    pub fn sample(&mut self) -> anyhow::Result<MetricSnapshot> {
        let value = self
            .metric
            .sample()
            .map_err(|e| anyhow::anyhow!("{}: {:#}", self.key, e))?;
        // NaN/inf would serialize as null and poison the window until the next flush
        anyhow::ensure!(value.is_finite(), "{}: non-finite sample {}", self.key, value);
        self.state.update(value);
        Ok(self.state.snapshot())
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }
}

impl std::fmt::Debug for MetricAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricAggregator")
            .field("key", &self.key)
            .field("state", &self.state)
            .finish()
    }
}

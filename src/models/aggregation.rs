// Running statistics for one metric and the value shape sent on the wire.

use serde::{Deserialize, Serialize};

/// min/max/total/count/sum_of_squares over every accepted sample since the last flush.
/// The zero value is the empty window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationState {
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub count: u64,
    pub sum_of_squares: f64,
}

impl AggregationState {
    /// Folds one sample into the window.
    pub fn update(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.total += value;
        self.count += 1;
        self.sum_of_squares += value * value;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Bare scalar for a single sample, the full record otherwise.
    pub fn snapshot(&self) -> MetricSnapshot {
        if self.count == 1 {
            MetricSnapshot::Scalar(self.total)
        } else {
            MetricSnapshot::Aggregate(*self)
        }
    }
}

/// One metric value in a component snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricSnapshot {
    Scalar(f64),
    Aggregate(AggregationState),
}

impl MetricSnapshot {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricSnapshot::Scalar(v) => Some(*v),
            MetricSnapshot::Aggregate(_) => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&AggregationState> {
        match self {
            MetricSnapshot::Scalar(_) => None,
            MetricSnapshot::Aggregate(state) => Some(state),
        }
    }
}

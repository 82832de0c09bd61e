// Metric sources and the keys they are aggregated and reported under.

use std::fmt;

/// Scope prefix of every metric key on the wire.
pub const METRIC_SCOPE: &str = "Component";

/// A named, unit-labeled scalar sample source.
///
/// `sample` is the only effectful call; `name` and `units` must be stable for the life of the
/// metric since they key its aggregation state.
pub trait Metric: Send {
    fn name(&self) -> &str;
    fn units(&self) -> &str;
    fn sample(&mut self) -> anyhow::Result<f64>;
}

/// Closure-backed metric. Build one with [`new_metric`].
pub struct FnMetric<F> {
    name: String,
    units: String,
    sample_fn: F,
}

/// Creates a metric that calls `sample_fn` on every cycle.
pub fn new_metric<F>(name: impl Into<String>, units: impl Into<String>, sample_fn: F) -> FnMetric<F>
where
    F: FnMut() -> anyhow::Result<f64> + Send,
{
    FnMetric {
        name: name.into(),
        units: units.into(),
        sample_fn,
    }
}

impl<F> Metric for FnMetric<F>
where
    F: FnMut() -> anyhow::Result<f64> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn units(&self) -> &str {
        &self.units
    }

    fn sample(&mut self) -> anyhow::Result<f64> {
        (self.sample_fn)()
    }
}

impl<F> fmt::Debug for FnMetric<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMetric")
            .field("name", &self.name)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

/// Identity of a metric inside one component: the (name, units) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    pub name: String,
    pub units: String,
}

impl MetricKey {
    pub fn new(name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
        }
    }

    pub fn of(metric: &dyn Metric) -> Self {
        Self::new(metric.name(), metric.units())
    }

    /// Key used in the payload's metric map, e.g. `Component/requests[ops/sec]`.
    pub fn wire_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}[{}]", METRIC_SCOPE, self.name, self.units)
    }
}

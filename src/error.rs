// Error types: composite accumulation for per-metric failures, plus setup/transport errors.

use std::fmt;

/// Errors raised while setting up or encoding for the collector transport.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid collector url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Holds zero or more errors gathered during one snapshot cycle.
///
/// Sampling failures are logged through this value and otherwise ignored, so working metrics
/// still reach the collector. A composite accumulated into another composite stays nested;
/// use [`CompositeError::merge`] to flatten.
#[derive(Debug, Default)]
pub struct CompositeError {
    errors: Vec<anyhow::Error>,
}

impl CompositeError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one error.
    pub fn accumulate<E>(&mut self, err: E)
    where
        E: Into<anyhow::Error>,
    {
        self.errors.push(err.into());
    }

    /// Appends `err` if present; `None` is a no-op.
    pub fn accumulate_opt<E>(&mut self, err: Option<E>)
    where
        E: Into<anyhow::Error>,
    {
        if let Some(err) = err {
            self.accumulate(err);
        }
    }

    /// Moves every error of `other` into this composite, in order.
    pub fn merge(&mut self, other: CompositeError) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &anyhow::Error> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was accumulated, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), CompositeError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "{}", only),
            all => {
                write!(f, "{} errors: [", all.len())?;
                for (i, err) in all.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{}\"", err)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl std::error::Error for CompositeError {}

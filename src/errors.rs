use std::io;

use thiserror::Error;

use crate::config::Counterbalancing;

/// Error type for experiment configuration, generation, and export failures.
#[derive(Debug, Error)]
pub enum IatError {
    /// Configuration that cannot produce a timeline.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Counterbalancing order without a block sequence.
    #[error("counterbalancing order {0:?} has no defined block sequence")]
    UnsupportedCounterbalancing(Counterbalancing),
    /// Config read or export write failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Malformed config or export JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input detected at initialization, before any step runs.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A computed energy, force, or position became non-finite mid-run.
    #[error("simulation diverged at step {step}: {reason}")]
    Divergence { step: usize, reason: String },

    /// Failure writing a trajectory frame to the output sink.
    #[error("trajectory output failed: {0}")]
    Output(#[from] csv::Error),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub(crate) fn divergence(step: usize, reason: impl Into<String>) -> Self {
        Error::Divergence {
            step,
            reason: reason.into(),
        }
    }
}

use thiserror::Error;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a step function. Kept boxed so collaborators can use
/// whatever error type they like; the driver hands it back untouched.
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("operation '{op}' has the wrong step shape (full={needs_full_enumerate})")]
    ShapeMismatch {
        op: String,
        needs_full_enumerate: bool,
    },

    #[error("step '{op}' (pending index {index}) failed")]
    Step {
        op: String,
        index: usize,
        #[source]
        source: StepError,
    },

    #[error("bulk step '{op}' would materialize {len} elements, limit is {limit}")]
    MaterializeLimit { op: String, len: usize, limit: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Borrow the original step failure, if this error carries one.
    pub fn step_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Step { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

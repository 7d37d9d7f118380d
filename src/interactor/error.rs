//! Error type for user-supplied interactors.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Any failure raised inside an interactor or its execute step.
#[derive(Debug, thiserror::Error)]
#[error("Interactor failed: {0}")]
pub struct InteractorError(#[source] BoxError);

impl InteractorError {
    /// Wraps any error raised by an interactor.
    pub fn new(source: impl Into<BoxError>) -> Self {
        InteractorError(source.into())
    }
}

impl From<String> for InteractorError {
    fn from(msg: String) -> Self {
        InteractorError(msg.into())
    }
}

impl From<&str> for InteractorError {
    fn from(msg: &str) -> Self {
        InteractorError(msg.into())
    }
}

//! What an interactor hands back: a value, or a deferred step that produces one.

use crate::interactor::InteractorError;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type Deferred = Pin<Box<dyn Future<Output = Result<Value, InteractorError>> + Send>>;

pub enum InteractorOutput {
    /// The related entity itself.
    Direct(Value),
    /// An interactor that still has to be executed.
    Interactor(Box<dyn FnOnce() -> Deferred + Send>),
}

impl InteractorOutput {
    pub fn direct(value: impl Into<Value>) -> Self {
        InteractorOutput::Direct(value.into())
    }

    /// Wraps a step that produces the entity when executed.
    pub fn deferred<F, Fut>(execute: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value, InteractorError>> + Send + 'static,
    {
        InteractorOutput::Interactor(Box::new(move || Box::pin(execute())))
    }

    /// Runs the deferred step, if any, and returns the entity.
    pub async fn resolve(self) -> Result<Value, InteractorError> {
        match self {
            InteractorOutput::Direct(value) => Ok(value),
            InteractorOutput::Interactor(execute) => execute().await,
        }
    }
}

impl fmt::Debug for InteractorOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractorOutput::Direct(value) => f.debug_tuple("Direct").field(value).finish(),
            InteractorOutput::Interactor(_) => f.write_str("Interactor(..)"),
        }
    }
}

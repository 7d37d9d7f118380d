//! # Interactor Declarations
//!
//! A schema declares how its related entities are fetched with up to two
//! [`InteractorSpec`]s: `batch` (one call for a whole collection) and
//! `retrieve` (one call per entity). Each spec pairs an [`Interactor`] with the
//! ordered argument mappings used to build its call arguments.
//!
//! Any `Fn(Arguments) -> impl Future<Output = Result<InteractorOutput, InteractorError>>`
//! is an interactor:
//!
//! ```rust
//! use resource_expand::interactor::{Arguments, InteractorError, InteractorOutput, InteractorSpec};
//! use serde_json::json;
//!
//! let fetch_user = |args: Arguments| async move {
//!     Ok::<_, InteractorError>(InteractorOutput::direct(json!({"id": args["id"], "name": "Ursula"})))
//! };
//! let spec = InteractorSpec::new(fetch_user, [("author_id", "id")]).unwrap();
//! assert_eq!(spec.arguments()[0].argument(), "id");
//! ```

use crate::expander::ConfigurationError;
use crate::interactor::{InteractorError, InteractorOutput};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Keyword arguments passed to an interactor.
pub type Arguments = Map<String, Value>;

#[async_trait]
pub trait Interactor: Send + Sync {
    async fn call(&self, arguments: Arguments) -> Result<InteractorOutput, InteractorError>;
}

#[async_trait]
impl<F, Fut> Interactor for F
where
    F: Fn(Arguments) -> Fut + Send + Sync,
    Fut: Future<Output = Result<InteractorOutput, InteractorError>> + Send + 'static,
{
    async fn call(&self, arguments: Arguments) -> Result<InteractorOutput, InteractorError> {
        (self)(arguments).await
    }
}

/// Maps a field of the related value to an interactor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentMapping {
    field: String,
    argument: String,
}

impl ArgumentMapping {
    /// Field and argument share the name.
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            field: name.clone(),
            argument: name,
        }
    }

    /// Reads `field` from the related value and passes it as `argument`.
    pub fn renamed(field: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            argument: argument.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }
}

impl From<&str> for ArgumentMapping {
    fn from(name: &str) -> Self {
        ArgumentMapping::same(name)
    }
}

impl From<String> for ArgumentMapping {
    fn from(name: String) -> Self {
        ArgumentMapping::same(name)
    }
}

impl From<(&str, &str)> for ArgumentMapping {
    fn from((field, argument): (&str, &str)) -> Self {
        ArgumentMapping::renamed(field, argument)
    }
}

impl From<(String, String)> for ArgumentMapping {
    fn from((field, argument): (String, String)) -> Self {
        ArgumentMapping::renamed(field, argument)
    }
}

/// An interactor plus the argument mappings it is called with.
#[derive(Clone)]
pub struct InteractorSpec {
    interactor: Arc<dyn Interactor>,
    arguments: Vec<ArgumentMapping>,
}

impl InteractorSpec {
    /// Fails when a mapping has an empty name or two mappings target the same argument.
    pub fn new<I, A>(interactor: I, arguments: A) -> Result<Self, ConfigurationError>
    where
        I: Interactor + 'static,
        A: IntoIterator,
        A::Item: Into<ArgumentMapping>,
    {
        let arguments: Vec<ArgumentMapping> = arguments.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for mapping in &arguments {
            if mapping.field.is_empty() || mapping.argument.is_empty() {
                return Err(ConfigurationError::EmptyArgument);
            }
            if !seen.insert(mapping.argument.as_str()) {
                return Err(ConfigurationError::DuplicateArgument(mapping.argument.clone()));
            }
        }

        Ok(Self {
            interactor: Arc::new(interactor),
            arguments,
        })
    }

    pub fn arguments(&self) -> &[ArgumentMapping] {
        &self.arguments
    }

    /// Calls the interactor and resolves its output.
    pub async fn invoke(&self, arguments: Arguments) -> Result<Value, InteractorError> {
        self.interactor.call(arguments).await?.resolve().await
    }
}

impl fmt::Debug for InteractorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractorSpec")
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn echo(args: Arguments) -> Result<InteractorOutput, InteractorError> {
        Ok(InteractorOutput::Direct(Value::Object(args)))
    }

    #[test]
    fn test_mappings_accept_names_and_pairs() {
        let spec = InteractorSpec::new(echo, [ArgumentMapping::same("id"), ("author_id", "author").into()])
            .unwrap();
        assert_eq!(spec.arguments()[0], ArgumentMapping::renamed("id", "id"));
        assert_eq!(spec.arguments()[1].field(), "author_id");
        assert_eq!(spec.arguments()[1].argument(), "author");
    }

    #[test]
    fn test_malformed_mappings_are_configuration_errors() {
        assert!(matches!(
            InteractorSpec::new(echo, [""]),
            Err(ConfigurationError::EmptyArgument)
        ));
        assert!(matches!(
            InteractorSpec::new(echo, [("author_id", "id"), ("user_id", "id")]),
            Err(ConfigurationError::DuplicateArgument(name)) if name == "id"
        ));
    }

    #[tokio::test]
    async fn test_invoke_resolves_interactor_output() {
        let deferred = |args: Arguments| async move {
            Ok::<_, InteractorError>(InteractorOutput::deferred(move || async move {
                Ok(json!({"fetched": args["id"]}))
            }))
        };
        let spec = InteractorSpec::new(deferred, ["id"]).unwrap();

        let mut args = Arguments::new();
        args.insert("id".into(), json!(42));
        assert_eq!(spec.invoke(args).await.unwrap(), json!({"fetched": 42}));
    }
}

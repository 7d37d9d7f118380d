//! Error types for schema configuration and expansion.

use crate::interactor::InteractorError;

/// Errors in how a schema, field or interactor was declared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// An argument mapping with an empty field or argument name.
    #[error("Interactor argument mappings need a non-empty field and argument name")]
    EmptyArgument,

    #[error("Interactor argument \"{0}\" is mapped more than once")]
    DuplicateArgument(String),

    /// An expand path with an empty segment, such as `""` or `"author..profile"`.
    #[error("Invalid expand path \"{0}\"")]
    InvalidExpandPath(String),

    /// A dispatch needed an interactor the schema does not declare.
    #[error("Schema \"{schema}\" declares no {kind} interactor")]
    MissingInteractor { schema: String, kind: &'static str },
}

/// Errors raised while expanding a relation.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The related value has no field for a mapped argument.
    #[error("Related value has no field \"{field}\" for argument \"{argument}\"")]
    MissingArgument { field: String, argument: String },

    /// A to-many relation held something other than a list.
    #[error("Expansion through schema \"{schema}\" expects a list of related values")]
    NotACollection { schema: String },

    #[error(transparent)]
    Interactor(#[from] InteractorError),
}

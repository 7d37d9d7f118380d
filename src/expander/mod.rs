//! Expansion dispatch: from a raw related value to the fetched entity.

pub mod arguments;
pub mod error;
pub mod resource_expander;

pub use arguments::ArgumentBuilder;
pub use error::{ConfigurationError, ExpandError};
pub use resource_expander::ResourceExpander;

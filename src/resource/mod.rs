//! REST resources: endpoint metadata, URL patterns and persistence.
//!
//! - [`ResourceMetadata`] - validated "Meta" block with defaulted templates
//! - [`ResourcePattern`] - endpoint template resolved against a root URL
//! - [`Resource`] - one remote entity with `save` / `delete`
//! - [`ResourceManager`] - builds and fetches resources of one kind

pub mod error;
pub mod field;
pub mod manager;
pub mod metadata;
pub mod pattern;
#[allow(clippy::module_inception)]
pub mod resource;

pub use error::{ResourceError, RestFailure};
pub use field::{FieldDescriptor, FieldKind};
pub use manager::ResourceManager;
pub use metadata::{MetadataConfig, ResourceMetadata};
pub use pattern::{PatternError, ResourcePattern};
pub use resource::{Resource, ResourceDescriptor, SaveOutcome};

//! Serialization schemas with expandable relations.
//!
//! - [`Schema`] - declared fields, resource metadata and the active expand set
//! - [`SchemaMeta`] - endpoint metadata plus `batch` / `retrieve` interactors
//! - [`ExpandableNested`] - a relation field that can be expanded in place
//! - [`ExpandSet`] - field names marked for expansion

pub mod expand;
pub mod field;
pub mod meta;
#[allow(clippy::module_inception)]
pub mod schema;

pub use expand::ExpandSet;
pub use field::{ExpandableNested, Field};
pub use meta::SchemaMeta;
pub use schema::Schema;

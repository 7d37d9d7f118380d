//! # Schema
//!
//! A [`Schema`] describes how one kind of resource is serialized: its declared
//! fields, its [`SchemaMeta`] (endpoints plus interactors) and its active
//! [`ExpandSet`].
//!
//! ## Expand Normalization
//!
//! Every call to [`Schema::set_expand`] re-normalizes the whole tree:
//!
//! 1. Paths are validated (no empty segments).
//! 2. For each nested field, the suffixes of paths starting with its name are
//!    handed down, kept only when the nested schema declares their first
//!    segment. The nested schema normalizes them in turn.
//! 3. The first segment of every path becomes this schema's expand set.
//!
//! ```rust
//! use resource_expand::resource::MetadataConfig;
//! use resource_expand::schema::{ExpandableNested, Field, Schema, SchemaMeta};
//!
//! let meta = || SchemaMeta::new(MetadataConfig::new().item("things/{id}/")).unwrap();
//! let profile = Schema::new("Profile", meta(), vec![Field::value("bio")]);
//! let author = Schema::new(
//!     "Author",
//!     meta(),
//!     vec![Field::value("name"), ExpandableNested::new("profile", profile).into()],
//! );
//! let book = Schema::new(
//!     "Book",
//!     meta(),
//!     vec![Field::value("title"), ExpandableNested::new("author", author).into()],
//! )
//! .with_expand(["author.profile"])
//! .unwrap();
//!
//! assert!(book.expand().contains("author"));
//! assert!(book.nested("author").unwrap().schema().expand().contains("profile"));
//! ```

use crate::expander::{ConfigurationError, ExpandError};
use crate::resource::{ResourceDescriptor, ResourceManager};
use crate::schema::expand::{self, ExpandSet};
use crate::schema::{ExpandableNested, Field, SchemaMeta};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::instrument;

pub(crate) type DumpFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ExpandError>> + Send + 'a>>;

#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    meta: Arc<SchemaMeta>,
    fields: Vec<Field>,
    objects: ResourceManager,
    expand: ExpandSet,
}

impl Schema {
    /// Creates a schema with an empty expand set. Its resource descriptor is
    /// derived from `meta` and the declared fields.
    pub fn new(name: impl Into<String>, meta: SchemaMeta, fields: Vec<Field>) -> Self {
        let descriptor = ResourceDescriptor::new(
            meta.resource().clone(),
            fields.iter().map(Field::descriptor).collect(),
        );
        Self {
            name: name.into(),
            meta: Arc::new(meta),
            fields,
            objects: ResourceManager::new(Arc::new(descriptor)),
            expand: ExpandSet::new(),
        }
    }

    /// Builder form of [`Schema::set_expand`].
    pub fn with_expand<I, S>(mut self, paths: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_expand(paths)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &SchemaMeta {
        &self.meta
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// The nested field called `name`; `None` for plain or unknown fields.
    pub fn nested(&self, name: &str) -> Option<&ExpandableNested> {
        match self.field(name)? {
            Field::Nested(nested) => Some(nested),
            Field::Value(_) => None,
        }
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The manager for resources described by this schema.
    pub fn objects(&self) -> &ResourceManager {
        &self.objects
    }

    /// The resource descriptor built from this schema's metadata and fields.
    pub fn model(&self) -> &Arc<ResourceDescriptor> {
        self.objects.object_class()
    }

    pub fn expand(&self) -> &ExpandSet {
        &self.expand
    }

    /// Replaces the expand paths and re-normalizes every nested schema.
    pub fn set_expand<I, S>(&mut self, paths: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = expand::validate(paths)?;
        let mut suffixes = expand::suffixes(&paths);

        for field in &mut self.fields {
            if let Field::Nested(nested) = field {
                let propagated = suffixes.remove(nested.name()).unwrap_or_default();
                nested.propagate(propagated)?;
            }
        }

        self.expand = paths.iter().map(|path| expand::head(path)).collect();
        Ok(())
    }

    /// Empties this schema's expand set. Nested schemas keep theirs.
    pub fn clear_expand(&mut self) {
        self.expand = ExpandSet::new();
    }

    /// Serializes one object. Undeclared keys are dropped, missing keys are skipped.
    #[instrument(skip(self, object), fields(schema = %self.name))]
    pub async fn dump(&self, object: &Value) -> Result<Value, ExpandError> {
        self.dump_value(object).await
    }

    #[instrument(skip(self, objects), fields(schema = %self.name, size = objects.len()))]
    pub async fn dump_many(&self, objects: &[Value]) -> Result<Vec<Value>, ExpandError> {
        let mut dumped = Vec::with_capacity(objects.len());
        for object in objects {
            dumped.push(self.dump_value(object).await?);
        }
        Ok(dumped)
    }

    /// Boxed so nested schemas can recurse through it.
    pub(crate) fn dump_value<'a>(&'a self, value: &'a Value) -> DumpFuture<'a> {
        Box::pin(async move {
            let Value::Object(source) = value else {
                return Ok(value.clone());
            };

            let mut dumped = Map::new();
            for field in &self.fields {
                match field {
                    Field::Value(name) => {
                        if let Some(value) = source.get(name) {
                            dumped.insert(name.clone(), value.clone());
                        }
                    }
                    Field::Nested(nested) => {
                        if let Some(raw) = source.get(nested.name()) {
                            let value = nested.serialize(raw, &self.expand).await?;
                            dumped.insert(nested.name().to_string(), value);
                        }
                    }
                }
            }
            Ok(Value::Object(dumped))
        })
    }
}

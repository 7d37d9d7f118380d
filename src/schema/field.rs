//! # Schema Fields
//!
//! A schema field is either a plain value copied through serialization or an
//! [`ExpandableNested`] relation. A nested field owns the schema of the
//! related entity; when the containing schema marks the field for expansion
//! the raw related value (usually a foreign key) is swapped for the entity
//! its interactor returns, and the result goes through nested serialization.

use crate::expander::{ConfigurationError, ExpandError, ResourceExpander};
use crate::resource::FieldDescriptor;
use crate::schema::expand::{self, ExpandSet};
use crate::schema::Schema;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum Field {
    Value(String),
    Nested(ExpandableNested),
}

impl Field {
    pub fn value(name: impl Into<String>) -> Self {
        Field::Value(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Value(name) => name,
            Field::Nested(nested) => nested.name(),
        }
    }

    pub(crate) fn descriptor(&self) -> FieldDescriptor {
        match self {
            Field::Value(name) => FieldDescriptor::plain(name.clone()),
            Field::Nested(nested) => nested.descriptor(),
        }
    }
}

impl From<ExpandableNested> for Field {
    fn from(nested: ExpandableNested) -> Self {
        Field::Nested(nested)
    }
}

#[derive(Debug, Clone)]
pub struct ExpandableNested {
    name: String,
    schema: Box<Schema>,
    many: bool,
    through: Option<String>,
    expand: Vec<String>,
    expander: ResourceExpander,
}

impl ExpandableNested {
    /// A to-one relation called `name`, serialized through `schema`.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema: Box::new(schema),
            many: false,
            through: None,
            expand: Vec::new(),
            expander: ResourceExpander::new(),
        }
    }

    /// Marks the relation as to-many.
    pub fn many(mut self) -> Self {
        self.many = true;
        self
    }

    /// The relation is managed through an intermediate association and is
    /// never sent back to the server on save.
    pub fn through(mut self, association: impl Into<String>) -> Self {
        self.through = Some(association.into());
        self
    }

    /// Expand paths the nested schema always uses. When the containing schema
    /// propagates paths to this field they are narrowed to these.
    pub fn with_expand<I, S>(mut self, paths: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expand = expand::validate(paths)?;
        self.schema.set_expand(&self.expand)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_many(&self) -> bool {
        self.many
    }

    pub fn expand(&self) -> &[String] {
        &self.expand
    }

    pub(crate) fn descriptor(&self) -> FieldDescriptor {
        let primary_key = self.schema.meta().resource().primary_key();
        if self.many {
            let descriptor = FieldDescriptor::to_many(self.name.clone(), primary_key);
            match &self.through {
                Some(association) => descriptor.through(association.clone()),
                None => descriptor,
            }
        } else {
            FieldDescriptor::to_one(self.name.clone(), primary_key)
        }
    }

    /// Receives the suffixes of the containing schema's expand paths that start
    /// with this field's name. No suffixes restores the configured expand list.
    pub(crate) fn propagate(&mut self, suffixes: Vec<String>) -> Result<(), ConfigurationError> {
        if suffixes.is_empty() {
            return self.schema.set_expand(&self.expand);
        }

        let narrowed: Vec<String> = suffixes
            .into_iter()
            .filter(|path| self.schema.declares(expand::head(path)))
            .filter(|path| self.expand.is_empty() || self.expand.contains(path))
            .collect();
        self.schema.set_expand(&narrowed)
    }

    /// Serializes the related value, expanding it first when `expand` names this field.
    pub async fn serialize(&self, raw: &Value, expand: &ExpandSet) -> Result<Value, ExpandError> {
        if raw.is_null() {
            return Ok(Value::Null);
        }

        let value = if expand.contains(&self.name) {
            debug!(field = %self.name, many = self.many, "Expanding");
            self.expander.expand(&self.schema, self.many, raw).await?
        } else {
            raw.clone()
        };

        match (&value, self.many) {
            (Value::Array(items), true) => {
                let mut serialized = Vec::with_capacity(items.len());
                for item in items {
                    serialized.push(self.schema.dump_value(item).await?);
                }
                Ok(Value::Array(serialized))
            }
            _ => self.schema.dump_value(&value).await,
        }
    }
}

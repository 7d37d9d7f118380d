//! Field descriptors: which keys of a resource's data are declared, and which
//! of them point at other resources.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Plain,
    /// A single related resource, sent to the server as its primary key.
    ToOne { primary_key: String },
    /// A collection of related resources, sent as a list of primary keys.
    /// Relations managed through an intermediate association are not sent at all.
    ToMany {
        primary_key: String,
        through: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Plain,
        }
    }

    pub fn to_one(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ToOne {
                primary_key: primary_key.into(),
            },
        }
    }

    pub fn to_many(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::ToMany {
                primary_key: primary_key.into(),
                through: None,
            },
        }
    }

    pub fn through(mut self, association: impl Into<String>) -> Self {
        if let FieldKind::ToMany { through, .. } = &mut self.kind {
            *through = Some(association.into());
        }
        self
    }

    pub fn is_relation(&self) -> bool {
        !matches!(self.kind, FieldKind::Plain)
    }

    /// The value to send to the server for this field, or `None` to omit it.
    pub fn dereference(&self, value: &Value) -> Option<Value> {
        if !is_truthy(value) {
            return Some(value.clone());
        }
        match &self.kind {
            FieldKind::Plain => Some(value.clone()),
            FieldKind::ToOne { primary_key } => Some(key_of(value, primary_key)),
            FieldKind::ToMany { through: Some(_), .. } => None,
            FieldKind::ToMany { primary_key, through: None } => match value {
                Value::Array(items) => Some(Value::Array(
                    items.iter().map(|item| key_of(item, primary_key)).collect(),
                )),
                other => Some(key_of(other, primary_key)),
            },
        }
    }
}

/// An embedded related object is replaced by its key; a bare key is kept.
fn key_of(value: &Value, primary_key: &str) -> Value {
    match value {
        Value::Object(object) => object.get(primary_key).cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(object) => !object.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_one_sends_primary_key() {
        let field = FieldDescriptor::to_one("author", "id");
        assert_eq!(field.dereference(&json!({"id": 3, "name": "Le Guin"})), Some(json!(3)));
        assert_eq!(field.dereference(&json!(3)), Some(json!(3)));
        assert_eq!(field.dereference(&Value::Null), Some(Value::Null));
    }

    #[test]
    fn test_to_many_sends_key_list() {
        let field = FieldDescriptor::to_many("tags", "slug");
        let value = json!([{"slug": "scifi"}, {"slug": "classic"}, "loose"]);
        assert_eq!(field.dereference(&value), Some(json!(["scifi", "classic", "loose"])));
    }

    #[test]
    fn test_to_many_through_association_is_omitted() {
        let field = FieldDescriptor::to_many("members", "id").through("membership");
        assert_eq!(field.dereference(&json!([{"id": 1}])), None);
        // Empty collections are sent untouched.
        assert_eq!(field.dereference(&json!([])), Some(json!([])));
    }
}

//! Builds interactor arguments from raw related values.
//!
//! A related value is usually an object (`{"author_id": 42}`); each mapping
//! reads its field from it. A bare value (`42`, a foreign key on its own) is
//! bound to every mapped argument unchanged.

use crate::expander::ExpandError;
use crate::interactor::{ArgumentMapping, Arguments};
use serde_json::Value;

#[derive(Debug, Default, Clone, Copy)]
pub struct ArgumentBuilder;

impl ArgumentBuilder {
    /// One argument set from one related value.
    pub fn single(&self, raw: &Value, mappings: &[ArgumentMapping]) -> Result<Arguments, ExpandError> {
        mappings
            .iter()
            .map(|mapping| {
                let value = lookup(raw, mapping)?;
                Ok::<_, ExpandError>((mapping.argument().to_string(), value))
            })
            .collect()
    }

    /// One argument set per element of a collection, in order.
    pub fn per_item(
        &self,
        schema: &str,
        raw: &Value,
        mappings: &[ArgumentMapping],
    ) -> Result<Vec<Arguments>, ExpandError> {
        items(schema, raw)?
            .iter()
            .map(|item| self.single(item, mappings))
            .collect()
    }

    /// A single argument set where each argument is the list of that field
    /// across the whole collection.
    pub fn aggregate(
        &self,
        schema: &str,
        raw: &Value,
        mappings: &[ArgumentMapping],
    ) -> Result<Arguments, ExpandError> {
        let items = items(schema, raw)?;
        mappings
            .iter()
            .map(|mapping| {
                let values = items
                    .iter()
                    .map(|item| lookup(item, mapping))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, ExpandError>((mapping.argument().to_string(), Value::Array(values)))
            })
            .collect()
    }
}

fn lookup(raw: &Value, mapping: &ArgumentMapping) -> Result<Value, ExpandError> {
    match raw {
        Value::Object(object) => {
            object
                .get(mapping.field())
                .cloned()
                .ok_or_else(|| ExpandError::MissingArgument {
                    field: mapping.field().to_string(),
                    argument: mapping.argument().to_string(),
                })
        }
        bare => Ok(bare.clone()),
    }
}

fn items<'a>(schema: &str, raw: &'a Value) -> Result<&'a [Value], ExpandError> {
    raw.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ExpandError::NotACollection {
            schema: schema.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mappings() -> Vec<ArgumentMapping> {
        vec![ArgumentMapping::renamed("author_id", "id"), ArgumentMapping::same("lang")]
    }

    #[test]
    fn test_single_renames_fields() {
        let args = ArgumentBuilder
            .single(&json!({"author_id": 42, "lang": "en", "extra": 1}), &mappings())
            .unwrap();
        assert_eq!(Value::Object(args), json!({"id": 42, "lang": "en"}));
    }

    #[test]
    fn test_bare_value_binds_every_argument() {
        let args = ArgumentBuilder
            .single(&json!(42), &[ArgumentMapping::renamed("author_id", "id")])
            .unwrap();
        assert_eq!(Value::Object(args), json!({"id": 42}));
    }

    #[test]
    fn test_missing_field_is_reported() {
        let result = ArgumentBuilder.single(&json!({"lang": "en"}), &mappings());
        assert!(matches!(
            result,
            Err(ExpandError::MissingArgument { field, argument }) if field == "author_id" && argument == "id"
        ));
    }

    #[test]
    fn test_per_item_preserves_order() {
        let raw = json!([{"author_id": 3, "lang": "fr"}, {"author_id": 1, "lang": "en"}]);
        let sets = ArgumentBuilder.per_item("author", &raw, &mappings()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0]["id"], json!(3));
        assert_eq!(sets[1]["id"], json!(1));
    }

    #[test]
    fn test_aggregate_collects_columns() {
        let raw = json!([{"author_id": 3, "lang": "fr"}, {"author_id": 1, "lang": "en"}]);
        let args = ArgumentBuilder.aggregate("author", &raw, &mappings()).unwrap();
        assert_eq!(Value::Object(args), json!({"id": [3, 1], "lang": ["fr", "en"]}));
    }

    #[test]
    fn test_collections_must_be_lists() {
        let result = ArgumentBuilder.aggregate("author", &json!({"author_id": 3}), &mappings());
        assert!(matches!(result, Err(ExpandError::NotACollection { .. })));
    }
}

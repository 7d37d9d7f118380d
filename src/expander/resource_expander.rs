//! # Resource Expander
//!
//! Chooses and runs the interactor that replaces a raw related value with the
//! fetched entity. The raw value is only used to build call arguments.
//!
//! | `many` | `batch` declared | dispatch |
//! |--------|------------------|----------|
//! | true   | yes | `batch` once, with aggregated arguments |
//! | true   | no  | `retrieve` once per element, results in input order |
//! | false  | n/a | `retrieve` once |
//!
//! When `retrieve` is needed but not declared the expansion fails with
//! [`ConfigurationError::MissingInteractor`].

use crate::expander::{ArgumentBuilder, ConfigurationError, ExpandError};
use crate::interactor::InteractorSpec;
use crate::schema::Schema;
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceExpander {
    arguments: ArgumentBuilder,
}

impl ResourceExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `raw` with the entity (or entities, when `many`) fetched through `schema`'s interactors.
    #[instrument(skip(self, schema, raw), fields(schema = schema.name()))]
    pub async fn expand(&self, schema: &Schema, many: bool, raw: &Value) -> Result<Value, ExpandError> {
        let meta = schema.meta();

        if many {
            if let Some(batch) = meta.batch() {
                let arguments = self.arguments.aggregate(schema.name(), raw, batch.arguments())?;
                debug!(?arguments, "Batch dispatch");
                return Ok(batch.invoke(arguments).await?);
            }

            let retrieve = retrieve(schema)?;
            let argument_sets = self.arguments.per_item(schema.name(), raw, retrieve.arguments())?;
            debug!(calls = argument_sets.len(), "Per-item dispatch");

            let mut results = Vec::with_capacity(argument_sets.len());
            for arguments in argument_sets {
                results.push(retrieve.invoke(arguments).await?);
            }
            return Ok(Value::Array(results));
        }

        let retrieve = retrieve(schema)?;
        let arguments = self.arguments.single(raw, retrieve.arguments())?;
        debug!(?arguments, "Single dispatch");
        Ok(retrieve.invoke(arguments).await?)
    }
}

fn retrieve(schema: &Schema) -> Result<&InteractorSpec, ConfigurationError> {
    schema
        .meta()
        .retrieve()
        .ok_or_else(|| ConfigurationError::MissingInteractor {
            schema: schema.name().to_string(),
            kind: "retrieve",
        })
}

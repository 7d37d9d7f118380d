//! # Resource Manager
//!
//! The manager is the entry point a schema uses to reach its resources. It
//! holds the [`ResourceDescriptor`] (the "object class") and builds or fetches
//! [`Resource`]s bound to it. Retrieval is limited to a single item by primary
//! key and the first page of the list endpoint.

use crate::framework::{SharedClient, StatusClass};
use crate::resource::{Resource, ResourceDescriptor, ResourceError};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ResourceManager {
    object_class: Arc<ResourceDescriptor>,
}

impl ResourceManager {
    /// Creates a manager for resources described by `object_class`.
    pub fn new(object_class: Arc<ResourceDescriptor>) -> Self {
        Self { object_class }
    }

    /// The descriptor every resource built by this manager shares.
    pub fn object_class(&self) -> &Arc<ResourceDescriptor> {
        &self.object_class
    }

    /// A new, unsaved resource.
    pub fn build(&self, client: SharedClient, data: Map<String, Value>) -> Resource {
        Resource::new(self.object_class.clone(), client, data)
    }

    /// GET the item endpoint for `pk`.
    #[instrument(skip(self, client))]
    pub async fn get(&self, client: &SharedClient, pk: &Value) -> Result<Resource, ResourceError> {
        let metadata = self.object_class.metadata();
        let mut params = Map::new();
        params.insert(metadata.primary_key().to_string(), pk.clone());
        let url = metadata.item().absolute_url(metadata.root(), &params)?;

        debug!(%url, "Sending request");
        let response = client.get(&url, &[]).await?;
        match response.class() {
            StatusClass::Success => {
                let data = response
                    .object()
                    .cloned()
                    .ok_or_else(|| ResourceError::UnexpectedBody { url: url.clone() })?;
                info!(%url, "Retrieved");
                self.persisted(client, data)
            }
            StatusClass::Validation | StatusClass::Server => {
                warn!(%url, status = response.status, "Retrieve failed");
                Err(ResourceError::from_response("retrieve", response))
            }
        }
    }

    /// GET the first page of the list endpoint.
    ///
    /// Accepts a bare JSON array or an object wrapping the array in `results`.
    #[instrument(skip(self, client))]
    pub async fn list(&self, client: &SharedClient) -> Result<Vec<Resource>, ResourceError> {
        let metadata = self.object_class.metadata();
        let url = metadata.list().absolute_url(metadata.root(), &Map::new())?;
        let query = metadata.list_query();

        debug!(%url, ?query, "Sending request");
        let response = client.get(&url, &query).await?;
        match response.class() {
            StatusClass::Success => {
                let items = match &response.body {
                    Some(Value::Array(items)) => items,
                    Some(Value::Object(page)) => match page.get("results") {
                        Some(Value::Array(items)) => items,
                        _ => return Err(ResourceError::UnexpectedBody { url }),
                    },
                    _ => return Err(ResourceError::UnexpectedBody { url }),
                };

                let resources = items
                    .iter()
                    .map(|item| {
                        let data = item
                            .as_object()
                            .cloned()
                            .ok_or_else(|| ResourceError::UnexpectedBody { url: url.clone() })?;
                        self.persisted(client, data)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                info!(%url, size = resources.len(), "Listed");
                Ok(resources)
            }
            StatusClass::Validation | StatusClass::Server => {
                warn!(%url, status = response.status, "List failed");
                Err(ResourceError::from_response("list", response))
            }
        }
    }

    /// A resource that already exists remotely. URLs are derived when the data
    /// carries a primary key.
    fn persisted(&self, client: &SharedClient, data: Map<String, Value>) -> Result<Resource, ResourceError> {
        let metadata = self.object_class.metadata();
        let has_pk = data
            .get(metadata.primary_key())
            .is_some_and(|value| !value.is_null());

        let (absolute_url, delete_url) = if has_pk {
            (
                Some(metadata.item().absolute_url(metadata.root(), &data)?),
                Some(metadata.delete().absolute_url(metadata.root(), &data)?),
            )
        } else {
            (None, None)
        };

        Ok(self.build(client.clone(), data).with_urls(absolute_url, delete_url))
    }
}

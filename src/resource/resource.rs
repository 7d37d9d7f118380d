//! # Resource
//!
//! A [`Resource`] is the in-memory copy of one remote entity. It owns its
//! field data, knows where it lives (`absolute_url`) and how to remove itself
//! (`delete_url`), and persists through a [`SharedClient`].
//!
//! ## Lifecycle
//!
//! ```text
//!   new ──save()──▶ persisted ──delete()──▶ deleted
//!   (no absolute_url)   (absolute_url + delete_url)   (URLs cleared)
//! ```
//!
//! `save()` on a new resource POSTs to the create URL and derives both URLs
//! from the primary key in the response. `save()` on a persisted resource PUTs
//! to `absolute_url` and never re-derives it. `delete()` without a delete URL
//! fails with [`ResourceError::NotPersisted`] instead of sending anything.
//! A create answered without an object body is a
//! [`ResourceError::MissingPrimaryKey`]; the resource stays new.

use crate::framework::{SharedClient, StatusClass};
use crate::resource::field::is_truthy;
use crate::resource::{FieldDescriptor, ResourceError, ResourceMetadata};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The class-level description shared by every resource of one kind:
/// endpoint metadata plus the declared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    metadata: ResourceMetadata,
    fields: Vec<FieldDescriptor>,
}

impl ResourceDescriptor {
    /// Creates a descriptor from validated metadata and the declared fields.
    pub fn new(metadata: ResourceMetadata, fields: Vec<FieldDescriptor>) -> Self {
        Self { metadata, fields }
    }

    pub fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The declared field called `name`, if any.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Outcome of [`Resource::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// `commit` was false; nothing was sent.
    Deferred,
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn is_created(self) -> bool {
        self == SaveOutcome::Created
    }
}

pub struct Resource {
    descriptor: Arc<ResourceDescriptor>,
    client: SharedClient,
    data: Map<String, Value>,
    absolute_url: Option<String>,
    delete_url: Option<String>,
}

impl Resource {
    /// Creates a new, unsaved resource. Prefer [`ResourceManager::build`](crate::resource::ResourceManager::build).
    pub fn new(descriptor: Arc<ResourceDescriptor>, client: SharedClient, data: Map<String, Value>) -> Self {
        Self {
            descriptor,
            client,
            data,
            absolute_url: None,
            delete_url: None,
        }
    }

    /// Binds the resource to known locations, as when it was fetched from the server.
    pub fn with_urls(mut self, absolute_url: Option<String>, delete_url: Option<String>) -> Self {
        self.absolute_url = absolute_url;
        self.delete_url = delete_url;
        self
    }

    pub fn descriptor(&self) -> &Arc<ResourceDescriptor> {
        &self.descriptor
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    /// Where the resource lives; `None` until it has been created.
    pub fn absolute_url(&self) -> Option<&str> {
        self.absolute_url.as_deref()
    }

    /// Where `delete()` sends its request; `None` when new or deleted.
    pub fn delete_url(&self) -> Option<&str> {
        self.delete_url.as_deref()
    }

    /// A declared field's value. Undeclared keys in `data` are not attributes.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.descriptor.field(name)?;
        self.data.get(name)
    }

    pub fn serializable_value(&self, name: &str) -> Option<&Value> {
        self.attr(name)
    }

    /// The primary key value from `data`. A null key counts as absent.
    pub fn pk(&self) -> Option<&Value> {
        self.data
            .get(self.descriptor.metadata().primary_key())
            .filter(|value| !value.is_null())
    }

    /// True until the resource has a location or a primary key.
    pub fn is_adding(&self) -> bool {
        self.absolute_url.is_none() && self.pk().is_none()
    }

    /// Validation hooks shared with schema-backed models; resources are always clean.
    pub fn full_clean(&self) {}

    pub fn validate_unique(&self) {}

    /// Unique-together and date checks: none for remote resources.
    pub fn unique_checks(&self) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
        (Vec::new(), Vec::new())
    }

    /// `<Resource: absolute_url>`
    pub fn label(&self) -> String {
        format!("<Resource: {}>", self.absolute_url.as_deref().unwrap_or("None"))
    }

    /// The payload sent on save: declared fields only, relations reduced to keys.
    pub fn request_data(&self) -> Map<String, Value> {
        self.data
            .iter()
            .filter_map(|(key, value)| {
                let field = self.descriptor.field(key)?;
                field.dereference(value).map(|value| (key.clone(), value))
            })
            .collect()
    }

    /// POSTs when new, PUTs to `absolute_url` otherwise. `commit = false` sends nothing.
    #[instrument(skip(self), fields(absolute_url = ?self.absolute_url))]
    pub async fn save(&mut self, commit: bool) -> Result<SaveOutcome, ResourceError> {
        if !commit {
            debug!("Save deferred");
            return Ok(SaveOutcome::Deferred);
        }

        let payload = Value::Object(self.request_data());
        debug!(?payload, "Sending request");

        let metadata = self.descriptor.metadata();
        let (created, response) = match &self.absolute_url {
            None => {
                let url = metadata.create().absolute_url(metadata.root(), &self.data)?;
                (true, self.client.post(&url, &payload).await?)
            }
            Some(url) => (false, self.client.put(url, &payload).await?),
        };

        match response.class() {
            StatusClass::Success => {
                match response.object() {
                    Some(body) => {
                        self.data = body.clone();
                        self.derive_urls(&response.url)?;
                    }
                    // A create must report the new primary key; an update may answer empty.
                    None if created => {
                        warn!(url = %response.url, "Create returned no object body");
                        return Err(ResourceError::MissingPrimaryKey {
                            field: self.descriptor.metadata().primary_key().to_string(),
                            url: response.url.clone(),
                        });
                    }
                    None => {}
                }
                info!(created, absolute_url = ?self.absolute_url, "Saved");
                Ok(if created { SaveOutcome::Created } else { SaveOutcome::Updated })
            }
            StatusClass::Validation | StatusClass::Server => {
                warn!(url = %response.url, status = response.status, "Save failed");
                Err(ResourceError::from_response("save", response))
            }
        }
    }

    fn derive_urls(&mut self, response_url: &str) -> Result<(), ResourceError> {
        if self.absolute_url.is_some() && self.delete_url.is_some() {
            return Ok(());
        }

        let metadata = self.descriptor.metadata();
        if self.pk().is_none() {
            return Err(ResourceError::MissingPrimaryKey {
                field: metadata.primary_key().to_string(),
                url: response_url.to_string(),
            });
        }

        if self.absolute_url.is_none() {
            self.absolute_url = Some(metadata.item().absolute_url(metadata.root(), &self.data)?);
        }
        if self.delete_url.is_none() {
            self.delete_url = Some(metadata.delete().absolute_url(metadata.root(), &self.data)?);
        }
        Ok(())
    }

    /// Deletes the remote entity. Returns the response body, if it had one.
    #[instrument(skip(self), fields(delete_url = ?self.delete_url))]
    pub async fn delete(&mut self) -> Result<Option<Value>, ResourceError> {
        let url = self.delete_url.clone().ok_or(ResourceError::NotPersisted {
            operation: "delete",
            missing: "delete_url",
        })?;

        let response = self.client.delete(&url).await?;
        match response.class() {
            StatusClass::Success => {
                self.absolute_url = None;
                self.delete_url = None;
                info!(%url, "Deleted");
                Ok(response.body.filter(is_truthy))
            }
            StatusClass::Validation | StatusClass::Server => {
                warn!(url = %response.url, status = response.status, "Delete failed");
                Err(ResourceError::from_response("delete", response))
            }
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.data.clone()))
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("data", &self.data)
            .field("absolute_url", &self.absolute_url)
            .field("delete_url", &self.delete_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockHttpClient;
    use crate::resource::MetadataConfig;
    use serde_json::json;

    fn descriptor() -> Arc<ResourceDescriptor> {
        let metadata = ResourceMetadata::from_config(
            MetadataConfig::new()
                .root("http://api.example.com/")
                .item("books/{id}/")
                .list("books/"),
        )
        .unwrap();
        Arc::new(ResourceDescriptor::new(
            metadata,
            vec![
                FieldDescriptor::plain("id"),
                FieldDescriptor::plain("title"),
                FieldDescriptor::to_one("author", "id"),
            ],
        ))
    }

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_attributes_are_limited_to_declared_fields() {
        let resource = Resource::new(
            descriptor(),
            MockHttpClient::new().client(),
            data(json!({"title": "Dune", "internal": true})),
        );
        assert_eq!(resource.attr("title"), Some(&json!("Dune")));
        assert_eq!(resource.attr("internal"), None);
        assert!(resource.is_adding());
        assert_eq!(resource.label(), "<Resource: None>");
        assert_eq!(resource.to_string(), r#"{"internal":true,"title":"Dune"}"#);
    }

    #[test]
    fn test_request_data_strips_unknown_and_dereferences() {
        let resource = Resource::new(
            descriptor(),
            MockHttpClient::new().client(),
            data(json!({
                "title": "Dune",
                "author": {"id": 9, "name": "Herbert"},
                "internal": true
            })),
        );
        assert_eq!(
            Value::Object(resource.request_data()),
            json!({"title": "Dune", "author": 9})
        );
    }

    #[test]
    fn test_validation_hooks_report_clean() {
        let resource = Resource::new(descriptor(), MockHttpClient::new().client(), Map::new());
        resource.full_clean();
        resource.validate_unique();
        let (unique, dates) = resource.unique_checks();
        assert!(unique.is_empty() && dates.is_empty());
    }

    #[tokio::test]
    async fn test_uncommitted_save_sends_nothing() {
        let mock = MockHttpClient::new();
        let mut resource = Resource::new(descriptor(), mock.client(), data(json!({"title": "Dune"})));

        let outcome = resource.save(false).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Deferred);
        assert!(mock.requests().is_empty());
        assert!(resource.absolute_url().is_none());
    }
}

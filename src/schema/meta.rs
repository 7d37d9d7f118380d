//! Schema-level configuration: resource endpoints plus expansion interactors.

use crate::expander::ConfigurationError;
use crate::interactor::{ArgumentMapping, Interactor, InteractorSpec};
use crate::resource::{MetadataConfig, PatternError, ResourceMetadata};

#[derive(Debug, Clone)]
pub struct SchemaMeta {
    resource: ResourceMetadata,
    batch: Option<InteractorSpec>,
    retrieve: Option<InteractorSpec>,
}

impl SchemaMeta {
    /// Validates `config`; no interactors are declared yet.
    pub fn new(config: MetadataConfig) -> Result<Self, PatternError> {
        Ok(Self::from_metadata(ResourceMetadata::from_config(config)?))
    }

    pub fn from_metadata(resource: ResourceMetadata) -> Self {
        Self {
            resource,
            batch: None,
            retrieve: None,
        }
    }

    /// Declares the interactor that fetches a whole collection in one call.
    pub fn with_batch<I, A>(mut self, interactor: I, arguments: A) -> Result<Self, ConfigurationError>
    where
        I: Interactor + 'static,
        A: IntoIterator,
        A::Item: Into<ArgumentMapping>,
    {
        self.batch = Some(InteractorSpec::new(interactor, arguments)?);
        Ok(self)
    }

    /// Declares the interactor that fetches one entity per call.
    pub fn with_retrieve<I, A>(mut self, interactor: I, arguments: A) -> Result<Self, ConfigurationError>
    where
        I: Interactor + 'static,
        A: IntoIterator,
        A::Item: Into<ArgumentMapping>,
    {
        self.retrieve = Some(InteractorSpec::new(interactor, arguments)?);
        Ok(self)
    }

    pub fn resource(&self) -> &ResourceMetadata {
        &self.resource
    }

    pub fn batch(&self) -> Option<&InteractorSpec> {
        self.batch.as_ref()
    }

    pub fn retrieve(&self) -> Option<&InteractorSpec> {
        self.retrieve.as_ref()
    }
}

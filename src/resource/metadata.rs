//! # Resource Metadata
//!
//! [`MetadataConfig`] is the declarative "Meta" block of a schema: endpoint
//! templates, root URL, primary key and pagination. It can be written in code
//! with its builder methods or deserialized from JSON.
//!
//! [`ResourceMetadata`] is the validated, immutable form. Defaults are applied
//! once, at construction:
//! - an empty `create` template falls back to `list`
//! - an empty `delete` template falls back to `item`
//! - an empty `primary_key` falls back to `"id"`

use crate::resource::{PatternError, ResourcePattern};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Unvalidated endpoint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub item: String,
    pub list: String,
    pub create: String,
    pub delete: String,
    pub root: String,
    pub primary_key: String,
    pub page_size: Option<u32>,
    /// Extra query parameters sent with every list request.
    pub page_size_params: Option<BTreeMap<String, String>>,
}

impl MetadataConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, template: impl Into<String>) -> Self {
        self.item = template.into();
        self
    }

    pub fn list(mut self, template: impl Into<String>) -> Self {
        self.list = template.into();
        self
    }

    pub fn create(mut self, template: impl Into<String>) -> Self {
        self.create = template.into();
        self
    }

    pub fn delete(mut self, template: impl Into<String>) -> Self {
        self.delete = template.into();
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = name.into();
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page_size_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.page_size_params
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Validated endpoint metadata with parsed patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMetadata {
    item: ResourcePattern,
    list: ResourcePattern,
    create: ResourcePattern,
    delete: ResourcePattern,
    root: String,
    primary_key: String,
    page_size: Option<u32>,
    page_size_params: BTreeMap<String, String>,
}

impl ResourceMetadata {
    /// Applies the defaults and parses every template.
    pub fn from_config(config: MetadataConfig) -> Result<Self, PatternError> {
        let create = if config.create.is_empty() { &config.list } else { &config.create };
        let delete = if config.delete.is_empty() { &config.item } else { &config.delete };
        let primary_key = if config.primary_key.is_empty() {
            DEFAULT_PRIMARY_KEY.to_string()
        } else {
            config.primary_key.clone()
        };

        Ok(Self {
            item: ResourcePattern::parse(&config.item)?,
            list: ResourcePattern::parse(&config.list)?,
            create: ResourcePattern::parse(create)?,
            delete: ResourcePattern::parse(delete)?,
            root: config.root,
            primary_key,
            page_size: config.page_size,
            page_size_params: config.page_size_params.unwrap_or_default(),
        })
    }

    pub fn item(&self) -> &ResourcePattern {
        &self.item
    }

    pub fn list(&self) -> &ResourcePattern {
        &self.list
    }

    pub fn create(&self) -> &ResourcePattern {
        &self.create
    }

    pub fn delete(&self) -> &ResourcePattern {
        &self.delete
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn page_size_params(&self) -> &BTreeMap<String, String> {
        &self.page_size_params
    }

    /// Query parameters for a list request.
    pub fn list_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .page_size
            .map(|size| ("page_size".to_string(), size.to_string()))
            .into_iter()
            .collect();
        query.extend(
            self.page_size_params
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        query
    }
}

impl TryFrom<MetadataConfig> for ResourceMetadata {
    type Error = PatternError;

    fn try_from(config: MetadataConfig) -> Result<Self, Self::Error> {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_delete_default_to_list_and_item() {
        let meta = ResourceMetadata::from_config(
            MetadataConfig::new().item("books/{id}/").list("books/"),
        )
        .unwrap();

        assert_eq!(meta.create().template(), "books/");
        assert_eq!(meta.delete().template(), "books/{id}/");
        assert_eq!(meta.primary_key(), "id");
    }

    #[test]
    fn test_explicit_templates_win() {
        let meta = ResourceMetadata::from_config(
            MetadataConfig::new()
                .item("books/{isbn}/")
                .list("books/")
                .create("books/new/")
                .delete("books/{isbn}/remove/")
                .primary_key("isbn"),
        )
        .unwrap();

        assert_eq!(meta.create().template(), "books/new/");
        assert_eq!(meta.delete().template(), "books/{isbn}/remove/");
        assert_eq!(meta.primary_key(), "isbn");
    }

    #[test]
    fn test_deserialize_meta_block() {
        let config: MetadataConfig = serde_json::from_str(
            r#"{
                "item": "authors/{id}/",
                "list": "authors/",
                "root": "http://api.example.com/",
                "page_size": 25,
                "page_size_params": {"ordering": "name"}
            }"#,
        )
        .unwrap();
        let meta = ResourceMetadata::try_from(config).unwrap();

        assert_eq!(meta.root(), "http://api.example.com/");
        assert_eq!(meta.create().template(), "authors/");
        assert_eq!(
            meta.list_query(),
            vec![
                ("page_size".to_string(), "25".to_string()),
                ("ordering".to_string(), "name".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_template_is_rejected() {
        let result = ResourceMetadata::from_config(MetadataConfig::new().item("books/{id/"));
        assert!(result.is_err());
    }
}

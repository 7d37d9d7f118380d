//! Expand sets and dotted expand paths.
//!
//! `["author.profile", "comments"]` gives this schema the set
//! `{author, comments}` and hands `["profile"]` down to the schema behind
//! `author`.

use crate::expander::ConfigurationError;
use std::collections::{BTreeMap, BTreeSet};

/// Top-level field names marked for expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandSet(BTreeSet<String>);

impl ExpandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ExpandSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        ExpandSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ExpandSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        ExpandSet(iter.into_iter().map(str::to_string).collect())
    }
}

/// Rejects paths with empty segments.
pub(crate) fn validate<I, S>(paths: I) -> Result<Vec<String>, ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref();
            if path.split('.').any(str::is_empty) {
                Err(ConfigurationError::InvalidExpandPath(path.to_string()))
            } else {
                Ok(path.to_string())
            }
        })
        .collect()
}

pub(crate) fn head(path: &str) -> &str {
    path.split_once('.').map_or(path, |(head, _)| head)
}

/// Dotted suffixes grouped by their first segment.
pub(crate) fn suffixes(paths: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for path in paths {
        if let Some((head, rest)) = path.split_once('.') {
            grouped.entry(head.to_string()).or_default().push(rest.to_string());
        }
    }
    grouped
}

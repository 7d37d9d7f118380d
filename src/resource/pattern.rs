//! # Resource Patterns
//!
//! A pattern is an endpoint template such as `"authors/{author_id}/books/{id}/"`.
//! Placeholders are filled from a JSON object (usually a resource's `data`)
//! and the result is resolved against the metadata root with [`url::Url::join`],
//! so `root = "http://api/v1/"` and `"books/{id}/"` give
//! `"http://api/v1/books/7/"`. A template that is already absolute ignores root.
//!
//! Each parameter is percent-encoded as exactly one path segment, so a value
//! like `"c/c++"` or `"what?"` cannot move the URL to another endpoint.

use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Unclosed placeholder in pattern \"{0}\"")]
    Unclosed(String),

    #[error("Empty placeholder in pattern \"{0}\"")]
    EmptyPlaceholder(String),

    #[error("Pattern \"{pattern}\" needs parameter \"{name}\"")]
    MissingParameter { pattern: String, name: String },

    #[error("Parameter \"{name}\" cannot be placed in a URL: {value}")]
    InvalidParameter { name: String, value: Value },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed endpoint template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePattern {
    template: String,
    segments: Vec<Segment>,
}

impl ResourcePattern {
    /// Parses a template, rejecting unclosed or empty placeholders.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| PatternError::Unclosed(template.to_string()))?;
            let name = after[..close].trim();
            if name.is_empty() {
                return Err(PatternError::EmptyPlaceholder(template.to_string()));
            }
            segments.push(Segment::Param(name.to_string()));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template as written.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in order of appearance.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fills the placeholders from `params` and resolves the result against `root`.
    pub fn absolute_url(&self, root: &str, params: &Map<String, Value>) -> Result<String, PatternError> {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| PatternError::MissingParameter {
                        pattern: self.template.clone(),
                        name: name.clone(),
                    })?;
                    path.push_str(&render(name, value)?);
                }
            }
        }

        if root.is_empty() {
            return Ok(path);
        }
        Ok(Url::parse(root)?.join(&path)?.to_string())
    }
}

/// Renders one parameter as a single percent-encoded path segment.
fn render(name: &str, value: &Value) -> Result<String, PatternError> {
    let invalid = || PatternError::InvalidParameter {
        name: name.to_string(),
        value: value.clone(),
    };
    match value {
        // Dot segments survive encoding and would be resolved away by the join.
        Value::String(text) if matches!(text.as_str(), "" | "." | "..") => Err(invalid()),
        Value::String(text) => Ok(urlencoding::encode(text).into_owned()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_parse_lists_placeholders() {
        let pattern = ResourcePattern::parse("authors/{author_id}/books/{id}/").unwrap();
        assert_eq!(pattern.params().collect::<Vec<_>>(), vec!["author_id", "id"]);
        assert_eq!(pattern.template(), "authors/{author_id}/books/{id}/");
    }

    #[test]
    fn test_parse_rejects_malformed_templates() {
        assert!(matches!(ResourcePattern::parse("books/{id/"), Err(PatternError::Unclosed(_))));
        assert!(matches!(
            ResourcePattern::parse("books/{}/"),
            Err(PatternError::EmptyPlaceholder(_))
        ));
    }

    #[test]
    fn test_absolute_url_joins_root() {
        let pattern = ResourcePattern::parse("books/{id}/").unwrap();
        let url = pattern
            .absolute_url("http://api.example.com/v1/", &params(json!({"id": 7, "title": "Dune"})))
            .unwrap();
        assert_eq!(url, "http://api.example.com/v1/books/7/");
    }

    #[test]
    fn test_absolute_url_without_root() {
        let pattern = ResourcePattern::parse("books/{slug}/").unwrap();
        let url = pattern.absolute_url("", &params(json!({"slug": "dune"}))).unwrap();
        assert_eq!(url, "books/dune/");
    }

    #[test]
    fn test_absolute_template_ignores_root() {
        let pattern = ResourcePattern::parse("http://other.example.com/books/").unwrap();
        let url = pattern.absolute_url("http://api.example.com/", &Map::new()).unwrap();
        assert_eq!(url, "http://other.example.com/books/");
    }

    #[test]
    fn test_parameters_stay_in_their_segment() {
        let pattern = ResourcePattern::parse("tags/{slug}/").unwrap();
        let url = |slug: &str| pattern.absolute_url("http://api/v1/", &params(json!({"slug": slug})));

        assert_eq!(url("what?").unwrap(), "http://api/v1/tags/what%3F/");
        assert_eq!(url("c/c++").unwrap(), "http://api/v1/tags/c%2Fc%2B%2B/");
        assert_eq!(url("../admin").unwrap(), "http://api/v1/tags/..%2Fadmin/");
        assert_eq!(url("a b#c").unwrap(), "http://api/v1/tags/a%20b%23c/");
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let pattern = ResourcePattern::parse("tags/{slug}/").unwrap();
        for slug in ["..", ".", ""] {
            assert!(matches!(
                pattern.absolute_url("http://api/v1/", &params(json!({"slug": slug}))),
                Err(PatternError::InvalidParameter { ref name, .. }) if name == "slug"
            ));
        }
    }

    #[test]
    fn test_missing_and_invalid_parameters() {
        let pattern = ResourcePattern::parse("books/{id}/").unwrap();
        assert!(matches!(
            pattern.absolute_url("", &Map::new()),
            Err(PatternError::MissingParameter { .. })
        ));
        assert!(matches!(
            pattern.absolute_url("", &params(json!({"id": null}))),
            Err(PatternError::InvalidParameter { .. })
        ));
    }
}

//! Error types for resource persistence.

use crate::framework::{HttpResponse, StatusClass, TransportError};
use crate::resource::PatternError;
use serde_json::Value;
use std::fmt;

/// A non-success response: which operation, where, what status, what body.
#[derive(Debug, Clone, PartialEq)]
pub struct RestFailure {
    pub operation: &'static str,
    pub url: String,
    pub status: u16,
    pub body: Option<Value>,
}

impl RestFailure {
    /// Captures a failed response for `operation` ("save", "delete", ...).
    pub fn new(operation: &'static str, response: HttpResponse) -> Self {
        Self {
            operation,
            url: response.url,
            status: response.status,
            body: response.body,
        }
    }
}

impl fmt::Display for RestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot {} \"{}\" ({}): ", self.operation, self.url, self.status)?;
        match &self.body {
            Some(body) => write!(f, "{}", body),
            None => Ok(()),
        }
    }
}

/// Errors that can occur while persisting or retrieving a resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The server answered 400. The caller can usually fix the payload and retry.
    #[error("{0}")]
    Validation(RestFailure),

    /// Any other non-success status.
    #[error("{0}")]
    Server(RestFailure),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The operation needs a URL the resource does not have yet (or any more).
    #[error("Cannot {operation}: resource has no {missing}")]
    NotPersisted {
        operation: &'static str,
        missing: &'static str,
    },

    /// A successful create returned a body without the primary key.
    #[error("Response from \"{url}\" has no primary key \"{field}\"")]
    MissingPrimaryKey { field: String, url: String },

    /// A successful retrieval returned something other than the expected shape.
    #[error("Unexpected response body from \"{url}\"")]
    UnexpectedBody { url: String },
}

impl ResourceError {
    /// Wraps a non-success response, classified by [`StatusClass`].
    pub fn from_response(operation: &'static str, response: HttpResponse) -> Self {
        let class = response.class();
        let failure = RestFailure::new(operation, response);
        match class {
            StatusClass::Validation => ResourceError::Validation(failure),
            StatusClass::Success | StatusClass::Server => ResourceError::Server(failure),
        }
    }

    /// The failed response, for validation and server errors.
    pub fn failure(&self) -> Option<&RestFailure> {
        match self {
            ResourceError::Validation(failure) | ResourceError::Server(failure) => Some(failure),
            _ => None,
        }
    }
}

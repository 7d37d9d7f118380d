//! # Transport Errors
//!
//! Failures that happen before an HTTP status can be inspected. Status-driven
//! failures (400 / 5xx) are not transport errors; they are classified by
//! [`StatusClass`](crate::framework::StatusClass) and surfaced as
//! [`ResourceError`](crate::resource::ResourceError).

/// Errors raised by an [`HttpClient`](crate::framework::HttpClient) implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or no response was received.
    #[error("Request to \"{url}\" failed: {message}")]
    Request { url: String, message: String },

    /// The response arrived but its body could not be read.
    #[error("Unreadable response from \"{url}\": {message}")]
    Body { url: String, message: String },
}

impl TransportError {
    /// A request that could not be sent or got no response.
    pub fn request(url: impl Into<String>, message: impl ToString) -> Self {
        TransportError::Request {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// A response whose body could not be read.
    pub fn body(url: impl Into<String>, message: impl ToString) -> Self {
        TransportError::Body {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

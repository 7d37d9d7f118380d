//! # HTTP Client Seam
//!
//! Resources never talk to the network directly. Every remote call goes through
//! the [`HttpClient`] trait, so the transport can be swapped for
//! [`ReqwestClient`](crate::clients::ReqwestClient) in production or
//! [`MockHttpClient`](crate::framework::mock::MockHttpClient) in tests.
//!
//! Calls are awaited one at a time. Timeouts, retries and connection pooling
//! belong to the implementation behind the trait.

use crate::framework::TransportError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared handle to a client, cheap to clone into every [`Resource`](crate::resource::Resource).
pub type SharedClient = Arc<dyn HttpClient>;

/// Status partition used by every remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200, 201 or 204.
    Success,
    /// 400: the server rejected the payload.
    Validation,
    /// Anything else.
    Server,
}

impl StatusClass {
    /// Classifies a raw HTTP status code.
    pub fn of(status: u16) -> Self {
        match status {
            200 | 201 | 204 => StatusClass::Success,
            400 => StatusClass::Validation,
            _ => StatusClass::Server,
        }
    }
}

/// A completed HTTP exchange: where it went, what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: Option<Value>,
}

impl HttpResponse {
    /// Creates a response for `url` with an optional decoded JSON body.
    pub fn new(url: impl Into<String>, status: u16, body: Option<Value>) -> Self {
        Self {
            url: url.into(),
            status,
            body,
        }
    }

    /// The [`StatusClass`] of this response's status.
    pub fn class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// The body, if it is a JSON object.
    pub fn object(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref().and_then(Value::as_object)
    }
}

/// The remote surface consumed by resources and managers.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;

    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError>;

    async fn put(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError>;

    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

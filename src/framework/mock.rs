//! # Mock Framework
//!
//! `MockHttpClient` implements [`HttpClient`] entirely in memory. Tests queue
//! expectations in the order requests will be made, hand the client to a
//! resource or manager, then call [`MockHttpClient::verify`].
//!
//! ```rust
//! use resource_expand::framework::mock::{Method, MockHttpClient};
//! use resource_expand::framework::HttpClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockHttpClient::new();
//!     mock.expect_post("http://api/books/")
//!         .return_ok(201, Some(json!({"id": 7})));
//!
//!     let client = mock.client();
//!     let response = client.post("http://api/books/", &json!({})).await.unwrap();
//!     assert_eq!(response.status, 201);
//!
//!     mock.verify();
//!     assert_eq!(mock.requests()[0].method, Method::Post);
//! }
//! ```
//!
//! A request that does not match the next expectation (method or URL) panics,
//! as does a request made after every expectation has been consumed.

use crate::framework::{HttpClient, HttpResponse, SharedClient, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A request as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

struct Expectation {
    method: Method,
    url: String,
    response: Result<HttpResponse, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<RecordedRequest>,
}

/// An in-memory HTTP client with expectation tracking.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle for resources and managers.
    pub fn client(&self) -> SharedClient {
        Arc::new(self.clone())
    }

    /// Expects a GET to `url` next. Query parameters are recorded, not matched.
    pub fn expect_get(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, url)
    }

    /// Expects a POST to `url` next.
    pub fn expect_post(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, url)
    }

    /// Expects a PUT to `url` next.
    pub fn expect_put(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, url)
    }

    /// Expects a DELETE to `url` next.
    pub fn expect_delete(&mut self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, url)
    }

    fn expect(&mut self, method: Method, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.into(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.lock().expectations.len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, request: RecordedRequest) -> Result<HttpResponse, TransportError> {
        let expectation = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            state.expectations.pop_front()
        };

        match expectation {
            Some(expected) if expected.method == request.method && expected.url == request.url => {
                expected.response
            }
            Some(expected) => panic!(
                "Unexpected request {:?} {}; expected {:?} {}",
                request.method, request.url, expected.method, expected.url
            ),
            None => panic!(
                "Unexpected request {:?} {}; no expectations left",
                request.method, request.url
            ),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Answers the request with a status and optional JSON body.
    pub fn return_ok(self, status: u16, body: Option<Value>) {
        let response = Ok(HttpResponse::new(self.url.clone(), status, body));
        self.push(response);
    }

    /// Fails the request at the transport level.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<HttpResponse, TransportError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.respond(RecordedRequest {
            method: Method::Get,
            url: url.to_string(),
            query: query.to_vec(),
            body: None,
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.respond(RecordedRequest {
            method: Method::Post,
            url: url.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }

    async fn put(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.respond(RecordedRequest {
            method: Method::Put,
            url: url.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.respond(RecordedRequest {
            method: Method::Delete,
            url: url.to_string(),
            query: Vec::new(),
            body: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_expectations_are_consumed_in_order() {
        let mut mock = MockHttpClient::new();
        mock.expect_put("http://api/books/1/").return_ok(200, Some(json!({"id": 1})));
        mock.expect_delete("http://api/books/1/").return_ok(204, None);

        let client = mock.client();
        let first = client.put("http://api/books/1/", &json!({"title": "Dune"})).await.unwrap();
        let second = client.delete("http://api/books/1/").await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 204);
        mock.verify();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, Some(json!({"title": "Dune"})));
        assert_eq!(requests[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_transport_error_injection() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("http://api/books/")
            .return_err(TransportError::request("http://api/books/", "connection refused"));

        let result = mock.client().get("http://api/books/", &[]).await;
        assert!(matches!(result, Err(TransportError::Request { .. })));
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_mismatched_url_panics() {
        let mut mock = MockHttpClient::new();
        mock.expect_delete("http://api/books/1/").return_ok(204, None);
        let _ = mock.client().delete("http://api/books/2/").await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_leftovers() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("http://api/books/").return_ok(200, Some(json!([])));
        mock.verify();
    }
}

//! # Reqwest Client
//!
//! Production [`HttpClient`] over `reqwest`. Bodies are sent as JSON. Response
//! bodies are decoded as JSON when possible; an empty body becomes `None` and
//! a non-JSON body (an HTML error page, say) is kept as a JSON string so that
//! validation and server errors still carry it.

use crate::framework::{HttpClient, HttpResponse, TransportError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    http: Client,
}

impl ReqwestClient {
    /// Wraps a configured `reqwest::Client` (timeouts, TLS, default headers).
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<HttpResponse, TransportError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::request(url, e))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::body(url, e))?;
        debug!(status, size = bytes.len(), "Received response");

        Ok(HttpResponse::new(url, status, decode(&bytes)))
    }
}

fn decode(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(String::from_utf8_lossy(bytes).into_owned())),
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    #[instrument(skip(self))]
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.send(url, self.http.get(url).query(query)).await
    }

    #[instrument(skip(self, body))]
    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.send(url, self.http.post(url).json(body)).await
    }

    #[instrument(skip(self, body))]
    async fn put(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.send(url, self.http.put(url).json(body)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.send(url, self.http.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_body_shapes() {
        assert_eq!(decode(b""), None);
        assert_eq!(decode(b"  \n"), None);
        assert_eq!(decode(br#"{"id": 1}"#), Some(json!({"id": 1})));
        assert_eq!(
            decode(b"<h1>Bad Gateway</h1>"),
            Some(Value::String("<h1>Bad Gateway</h1>".to_string()))
        );
    }
}

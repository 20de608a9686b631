//! HTTP client utilities for the dynaprice dashboard.
//!
//! Provides a small builder API over a pluggable [`Transport`] with
//! automatic JSON handling and base-URL joining.
//!
//! # Example
//!
//! ```rust,ignore
//! use dynaprice_fetch::{FetchClient, Method};
//!
//! let client = FetchClient::new().with_base_url("http://localhost:5000");
//!
//! let health: serde_json::Value = client
//!     .get("/health")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//!
//! let priced: serde_json::Value = client
//!     .post("/predict-price")
//!     .json(&request)?
//!     .send()
//!     .await?
//!     .json()?;
//! ```

mod error;
pub mod mock;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use mock::MockTransport;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

use std::collections::HashMap;

/// HTTP client for making outbound requests.
pub struct FetchClient<T = HttpTransport> {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: T,
}

impl Default for FetchClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient<HttpTransport> {
    /// Create a client over the real HTTP transport.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl<T: Transport> FetchClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Swap the base URL in place.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = Some(base_url.into());
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    /// Resolve `url` against the base URL.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url.to_string(),
        }
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let full_url = self.resolve(&url.into());

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: &self.transport,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T> {
    transport: &'a T,
    builder: RequestBuilder,
}

impl<'a, T: Transport> ClientRequestBuilder<'a, T> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<B: serde::Serialize + ?Sized>(mut self, value: &B) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Inspect the request that would be sent.
    pub fn peek(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, MockTransport, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_joins_base() {
        let client = FetchClient::with_transport(MockTransport::new())
            .with_base_url("http://localhost:5000/");
        assert_eq!(client.resolve("/health"), "http://localhost:5000/health");
        assert_eq!(
            client.resolve("https://elsewhere/health"),
            "https://elsewhere/health"
        );
    }

    #[test]
    fn test_resolve_without_base() {
        let client = FetchClient::with_transport(MockTransport::new());
        assert_eq!(client.resolve("/health"), "/health");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::with_transport(MockTransport::new())
            .with_base_url("http://api")
            .with_default_header("Accept", "application/json");
        let req = client.get("/health");
        assert_eq!(
            req.peek().headers().get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_send_through_mock() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Post, "/train-model", 200, json!({"train_score": 0.9}));
        let client = FetchClient::with_transport(mock.clone()).with_base_url("http://api");

        let resp = client
            .post("/train-model")
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();
        let body: serde_json::Value = resp.json().unwrap();
        assert_eq!(body["train_score"], 0.9);
        assert_eq!(mock.requests()[0].url(), "http://api/train-model");
    }

    #[test]
    fn test_set_base_url() {
        let mut client = FetchClient::with_transport(MockTransport::new()).with_base_url("http://a");
        client.set_base_url("http://b");
        assert_eq!(client.base_url(), Some("http://b"));
    }
}

//! Transports that actually move a request over the wire.

use async_trait::async_trait;
use tracing::debug;

use crate::{FetchError, Method, RequestBuilder, Response};

/// Sends a built request and buffers the response.
///
/// Non-2xx statuses are *not* errors at this level; callers decide with
/// [`Response::error_for_status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// reqwest-backed transport used outside of tests.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing reqwest client (connection pool, proxies, TLS roots).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(to_reqwest(request.method), request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "response received");
        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest(Method::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest(Method::Delete), reqwest::Method::DELETE);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        let transport = HttpTransport::new();
        // Port 9 (discard) on loopback is closed on any sane test box.
        let err = transport
            .send(RequestBuilder::new(Method::Get, "http://127.0.0.1:9/health"))
            .await
            .unwrap_err();
        assert!(err.is_transport(), "got {:?}", err);
    }
}

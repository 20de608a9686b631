//! Scripted in-memory transport for tests and offline demos.
//!
//! Responses are registered per `(method, path)`. Each registration is
//! queued; the last queued answer for a route keeps answering once the
//! queue is drained, so a single registration behaves like a fixed stub.
//!
//! ```rust,ignore
//! let mock = MockTransport::new();
//! mock.respond_json(Method::Get, "/health", 200, json!({"status": "ok"}));
//! let client = FetchClient::with_transport(mock.clone()).with_base_url("http://api");
//! ```
//!
//! The path may include a query string; an exact match wins, otherwise
//! the query is ignored.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{FetchError, Method, RequestBuilder, Response, Transport};

type Scripted = Result<Response, FetchError>;

struct Route {
    method: Method,
    path: String,
    answers: VecDeque<Scripted>,
}

#[derive(Default)]
struct MockState {
    routes: Vec<Route>,
    requests: Vec<RequestBuilder>,
}

/// A cloneable handle; clones share the same script and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a raw answer for a route.
    pub fn push(&self, method: Method, path: impl Into<String>, answer: Scripted) {
        let path = path.into();
        let mut state = self.state();
        match state
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.answers.push_back(answer),
            None => state.routes.push(Route {
                method,
                path,
                answers: VecDeque::from([answer]),
            }),
        }
    }

    /// Queue a JSON answer with the given status.
    pub fn respond_json(
        &self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) {
        self.push(method, path, Ok(Response::json_body(status, &body)));
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, method: Method, path: impl Into<String>, error: FetchError) {
        self.push(method, path, Err(error));
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.state().requests.clone()
    }

    /// Number of requests that hit `method path` (query ignored).
    pub fn request_count(&self, method: Method, path: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && strip_query(r.path()) == strip_query(path))
            .count()
    }

    /// Forget the request log, keep the script.
    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }
}

fn strip_query(path: &str) -> &str {
    path.split_once('?').map(|(p, _)| p).unwrap_or(path)
}

fn next_answer(route: &mut Route) -> Option<Scripted> {
    if route.answers.len() > 1 {
        route.answers.pop_front()
    } else {
        route.answers.front().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut state = self.state();
        state.requests.push(request.clone());

        let path = request.path().to_string();
        let index = state
            .routes
            .iter()
            .position(|r| r.method == request.method && r.path == path)
            .or_else(|| {
                state
                    .routes
                    .iter()
                    .position(|r| r.method == request.method && r.path == strip_query(&path))
            });

        index
            .and_then(|i| next_answer(&mut state.routes[i]))
            .unwrap_or_else(|| {
                Err(FetchError::Unscripted {
                    method: request.method.to_string(),
                    url: request.url.clone(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(path: &str) -> RequestBuilder {
        RequestBuilder::new(Method::Get, format!("http://api{}", path))
    }

    #[tokio::test]
    async fn test_single_registration_answers_repeatedly() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Get, "/health", 200, json!({"status": "ok"}));

        for _ in 0..3 {
            let resp = mock.send(get("/health")).await.unwrap();
            assert_eq!(resp.status, 200);
        }
        assert_eq!(mock.request_count(Method::Get, "/health"), 3);
    }

    #[tokio::test]
    async fn test_queued_answers_drain_in_order() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Get, "/health", 500, json!({"detail": "down"}));
        mock.respond_json(Method::Get, "/health", 200, json!({"status": "ok"}));

        assert_eq!(mock.send(get("/health")).await.unwrap().status, 500);
        assert_eq!(mock.send(get("/health")).await.unwrap().status, 200);
        assert_eq!(mock.send(get("/health")).await.unwrap().status, 200);
    }

    #[tokio::test]
    async fn test_query_falls_back_to_bare_path() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Get, "/products", 200, json!({"products": []}));
        let resp = mock.send(get("/products?skip=0&limit=500")).await.unwrap();
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn test_method_must_match() {
        let mock = MockTransport::new();
        mock.respond_json(Method::Post, "/train-model", 200, json!({}));
        let err = mock.send(get("/train-model")).await.unwrap_err();
        assert!(matches!(err, FetchError::Unscripted { .. }));
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mock = MockTransport::new();
        mock.fail(
            Method::Get,
            "/health",
            FetchError::RequestError("connection refused".into()),
        );
        let err = mock.send(get("/health")).await.unwrap_err();
        assert!(err.is_transport());
    }
}

//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response carrying a JSON document.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// FastAPI-style `{"detail": "..."}` bodies are unwrapped into the message.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = match self.json::<serde_json::Value>() {
            Ok(serde_json::Value::Object(map)) => match map.get("detail") {
                Some(serde_json::Value::String(detail)) => detail.clone(),
                Some(other) => other.to_string(),
                None => serde_json::Value::Object(map).to_string(),
            },
            _ => self
                .text()
                .ok()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        };
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(503, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        let resp = make_response(200, br#"{"products_loaded": 45}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["products_loaded"], 45);
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"<html>oops</html>");
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_header_case_insensitive() {
        let resp = Response::json_body(200, &serde_json::json!({}));
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_error_for_status_passes_success() {
        assert!(make_response(200, b"{}").error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_unwraps_detail() {
        let resp = make_response(503, br#"{"detail": "Model not loaded"}"#);
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 503,
                message: "Model not loaded".to_string()
            }
        );
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_error_for_status_plain_text() {
        let resp = make_response(404, b"Not Found");
        match resp.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_for_status_empty_body() {
        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert!(err.to_string().contains("Unknown error"));
    }
}

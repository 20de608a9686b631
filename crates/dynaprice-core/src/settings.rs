//! Persistent settings contract.

use std::collections::HashMap;

use crate::error::DashboardError;

/// Key under which the API base URL is stored.
pub const API_URL_KEY: &str = "apiUrl";

/// Used when nothing is stored.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Key/value store that survives sessions.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError>;
}

/// The configured API base URL, or the default.
pub fn api_url(store: &dyn SettingsStore) -> String {
    store
        .get(API_URL_KEY)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Reject values that cannot be a base URL before they are persisted.
pub fn validate_api_url(url: &str) -> Result<String, DashboardError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(DashboardError::Validation(format!(
            "API URL must start with http:// or https://, got {:?}",
            url
        )));
    }
    let host = url.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if host.trim_matches('/').is_empty() {
        return Err(DashboardError::Validation("API URL has no host".into()));
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Process-local settings, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        assert_eq!(api_url(&MemorySettings::new()), DEFAULT_API_URL);
        let blank = MemorySettings::new().with(API_URL_KEY, "  ");
        assert_eq!(api_url(&blank), DEFAULT_API_URL);
    }

    #[test]
    fn test_stored_url_wins() {
        let store = MemorySettings::new().with(API_URL_KEY, "http://pricing:8000");
        assert_eq!(api_url(&store), "http://pricing:8000");
    }

    #[test]
    fn test_validate_api_url() {
        assert_eq!(
            validate_api_url(" http://pricing:8000/ ").unwrap(),
            "http://pricing:8000"
        );
        assert!(validate_api_url("pricing:8000").is_err());
        assert!(validate_api_url("http://").is_err());
    }
}

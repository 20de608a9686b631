//! CLI configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use dynaprice_core::dashboard::DashboardOptions;
use dynaprice_core::export::EXPORT_FILENAME;
use dynaprice_core::search::PAGE_SIZE;
use dynaprice_core::settings::{SettingsStore, API_URL_KEY};
use dynaprice_core::DashboardError;
use dynaprice_fetch::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// File names looked for when walking up from the working directory.
pub const CONFIG_NAMES: [&str; 3] = ["dynaprice.toml", ".dynaprice.toml", "dynaprice.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Pricing service connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Product list fetching.
    #[serde(default)]
    pub products: ProductsConfig,

    /// Analytics table sizes.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// CSV export.
    #[serde(default)]
    pub export: ExportConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Method used for `/price/{id}`.
    pub fn price_method(&self) -> Result<Method> {
        match Method::parse(&self.api.price_method) {
            Some(method) => Ok(method),
            None => bail!("api.price_method '{}' is not an HTTP method", self.api.price_method),
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            fetch_limit: self.products.fetch_limit,
            analytics_limit: self.analytics.limit,
            low_stock_threshold: self.analytics.low_stock_threshold,
            page_size: PAGE_SIZE,
        }
    }

    /// Read a value by dotted key.
    pub fn get(&self, key: &str) -> Result<Value> {
        let parts: Vec<&str> = key.split('.').collect();

        let value = match parts.as_slice() {
            ["api", "url"] => json!(self.api.url),
            ["api", "price_method"] => json!(self.api.price_method),
            ["products", "fetch_limit"] => json!(self.products.fetch_limit),
            ["analytics", "limit"] => json!(self.analytics.limit),
            ["analytics", "low_stock_threshold"] => json!(self.analytics.low_stock_threshold),
            ["export", "filename"] => json!(self.export.filename),
            ["logging", "format"] => json!(self.logging.format),
            _ => bail!("Unknown config key: {}", key),
        };
        Ok(value)
    }

    /// Write a value by dotted key. `api.url` is handled by [`FileSettings`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "price_method"] => {
                if Method::parse(value).is_none() {
                    bail!("'{}' is not an HTTP method", value);
                }
                self.api.price_method = value.to_uppercase();
            }
            ["products", "fetch_limit"] => self.products.fetch_limit = value.parse()?,
            ["analytics", "limit"] => self.analytics.limit = value.parse()?,
            ["analytics", "low_stock_threshold"] => {
                self.analytics.low_stock_threshold = value.parse()?
            }
            ["export", "filename"] => self.export.filename = value.to_string(),
            ["logging", "format"] => {
                self.logging.format = value.parse().map_err(anyhow::Error::msg)?
            }
            _ => bail!("Unknown or read-only config key: {}", key),
        }

        Ok(())
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Some(ref url) = self.api.url {
            if let Err(e) = dynaprice_core::settings::validate_api_url(url) {
                errors.push(format!("api.url: {}", e));
            }
        }
        if Method::parse(&self.api.price_method).is_none() {
            errors.push(format!(
                "api.price_method '{}' is not an HTTP method",
                self.api.price_method
            ));
        }
        if self.products.fetch_limit == 0 {
            errors.push("products.fetch_limit must be at least 1".to_string());
        }
        if self.analytics.limit == 0 {
            warnings.push("analytics.limit is 0, analytics tables will be empty".to_string());
        }
        if self.export.filename.trim().is_empty() {
            errors.push("export.filename is required".to_string());
        } else if !self.export.filename.ends_with(".csv") {
            warnings.push(format!(
                "export.filename '{}' does not end in .csv",
                self.export.filename
            ));
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Pricing service connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL. Unset means the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// HTTP method for `/price/{id}` (default: GET).
    #[serde(default = "default_price_method")]
    pub price_method: String,
}

fn default_price_method() -> String {
    "GET".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: None,
            price_method: default_price_method(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductsConfig {
    /// `limit` sent with the product fetch (default: 500).
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
}

fn default_fetch_limit() -> usize {
    500
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            fetch_limit: default_fetch_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsConfig {
    /// Rows in the top-demand and high-value tables (default: 10).
    #[serde(default = "default_ten")]
    pub limit: usize,

    /// Stock level below which a product is listed as low (default: 10).
    #[serde(default = "default_threshold")]
    pub low_stock_threshold: u32,
}

fn default_ten() -> usize {
    10
}

fn default_threshold() -> u32 {
    10
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            limit: default_ten(),
            low_stock_threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    EXPORT_FILENAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "pretty" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected human or json)", other)),
        }
    }
}

/// Settings store backed by the config file.
///
/// Only `apiUrl` is stored; it maps to `[api] url`. Every write saves the
/// whole file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    config: CliConfig,
}

impl FileSettings {
    pub fn new(path: PathBuf, config: CliConfig) -> Self {
        Self { path, config }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            API_URL_KEY => self.config.api.url.clone(),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        match key {
            API_URL_KEY => self.config.api.url = Some(value.to_string()),
            other => return Err(DashboardError::Settings(format!("unknown setting: {}", other))),
        }
        self.config
            .save(&self.path)
            .map_err(|e| DashboardError::Settings(format!("{:#}", e)))
    }
}

/// Generate a default dynaprice.toml config file.
pub fn generate_default_config(api_url: &str) -> String {
    format!(
        r#"# dynaprice dashboard configuration

[api]
url = "{api_url}"
# Set to "POST" for backends that mount /price/{{id}} as POST.
price_method = "GET"

[products]
fetch_limit = 500

[analytics]
limit = 10
low_stock_threshold = 10

[export]
filename = "{filename}"

[logging]
# "human" or "json"
format = "human"
"#,
        api_url = api_url,
        filename = EXPORT_FILENAME,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config("http://localhost:5000")).unwrap();
        assert_eq!(config.api.url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.products, ProductsConfig::default());
        assert_eq!(config.analytics, AnalyticsConfig::default());
        assert_eq!(config.export.filename, "products.csv");
        assert_eq!(config.price_method().unwrap(), Method::Get);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.dashboard_options(), DashboardOptions::default());
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut config = CliConfig::default();
        config.set("api.price_method", "post").unwrap();
        config.set("analytics.low_stock_threshold", "5").unwrap();
        config.set("logging.format", "json").unwrap();

        assert_eq!(config.get("api.price_method").unwrap(), json!("POST"));
        assert_eq!(config.get("analytics.low_stock_threshold").unwrap(), json!(5));
        assert_eq!(config.get("logging.format").unwrap(), json!("json"));
        assert_eq!(config.get("api.url").unwrap(), Value::Null);
        assert!(config.set("api.price_method", "FETCH").is_err());
        assert!(config.get("cart.total").is_err());
    }

    #[test]
    fn test_get_keeps_quotes_and_backslashes() {
        let mut config = CliConfig::default();
        config.set("export.filename", r#"C:\exports\a"b.csv"#).unwrap();

        let value = config.get("export.filename").unwrap();
        assert_eq!(value.as_str(), Some(r#"C:\exports\a"b.csv"#));

        let line = json!({"key": "export.filename", "value": value}).to_string();
        let back: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(back["value"], r#"C:\exports\a"b.csv"#);
    }

    #[test]
    fn test_check_flags_bad_values() {
        let mut config = CliConfig::default();
        config.api.url = Some("localhost:5000".into());
        config.export.filename = "products.txt".into();
        let (errors, warnings) = config.check();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("api.url"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_file_settings_persist_api_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dynaprice.toml");
        let mut settings = FileSettings::new(path.clone(), CliConfig::default());

        assert!(settings.get(API_URL_KEY).is_none());
        settings.set(API_URL_KEY, "http://pricing:8000").unwrap();

        let reloaded = CliConfig::load(&path).unwrap();
        assert_eq!(reloaded.api.url.as_deref(), Some("http://pricing:8000"));
        assert!(settings.set("theme", "dark").is_err());
    }

    #[test]
    fn test_json_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dynaprice.json");
        let mut config = CliConfig::default();
        config.products.fetch_limit = 50;
        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }
}

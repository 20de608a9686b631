//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dynaprice_core::api::PricingApi;
use dynaprice_core::dashboard::{Dashboard, DashboardOptions};
use dynaprice_core::settings::{self, DEFAULT_API_URL};
use dynaprice_fetch::HttpTransport;

use crate::config::{CliConfig, FileSettings, CONFIG_NAMES};
use crate::output::Output;

/// A dashboard session over HTTP with file-backed settings.
pub type Session = Dashboard<HttpTransport, FileSettings>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with command-line overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, api_url: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(url) = api_url {
            config.api.url = Some(settings::validate_api_url(url)?);
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find a config file in the directory tree, then in the user config dir.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        let user = user_config_path()?;
        let config = CliConfig::load(&user).ok()?;
        Some((user, config))
    }

    /// Where settings changes are written.
    pub fn settings_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .or_else(user_config_path)
            .unwrap_or_else(|| self.cwd.join(CONFIG_NAMES[0]))
    }

    pub fn settings(&self) -> FileSettings {
        FileSettings::new(self.settings_path(), self.config.clone())
    }

    /// Base URL requests will go to.
    pub fn api_url(&self) -> &str {
        self.config.api.url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Start a dashboard session from the configuration.
    pub fn dashboard(&self) -> Result<Session> {
        self.dashboard_with_options(self.config.dashboard_options())
    }

    pub fn dashboard_with_options(&self, options: DashboardOptions) -> Result<Session> {
        let api = PricingApi::http(self.api_url()).with_price_method(self.config.price_method()?);
        Ok(Dashboard::with_options(api, self.settings(), options))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// `$HOME/.config/dynaprice/dynaprice.toml`.
fn user_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("dynaprice")
            .join(CONFIG_NAMES[0]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_config_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".dynaprice.toml"),
            "[api]\nurl = \"http://pricing:8000\"\n",
        )
        .unwrap();

        let (path, config) = Context::find_config(&nested).unwrap();
        assert_eq!(path, dir.path().join(".dynaprice.toml"));
        assert_eq!(config.api.url.as_deref(), Some("http://pricing:8000"));
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        };
        assert_eq!(ctx.resolve_path("out.csv"), PathBuf::from("/work/out.csv"));
        assert_eq!(ctx.resolve_path("/tmp/out.csv"), PathBuf::from("/tmp/out.csv"));
        assert_eq!(ctx.api_url(), DEFAULT_API_URL);
    }
}

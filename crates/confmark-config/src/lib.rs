//! Configuration management for confmark.
//!
//! Parses `confmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.api_token`
//! - `confluence.token`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config,
/// and only when a `[confluence]` section is present.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Confluence base URL.
    pub base_url: Option<String>,
    /// Override target space key.
    pub space_key: Option<String>,
    /// Override parent page ID for new pages.
    pub parent_id: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "confmark.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence configuration.
    pub confluence: Option<ConfluenceConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence configuration.
///
/// Authentication is either `username` plus `api_token` (Basic) or `token`
/// (Bearer personal access token).
#[derive(Debug, Clone, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence base URL, including any context path such as `/wiki`.
    pub base_url: String,
    /// Default space for pages looked up or created by title.
    #[serde(default)]
    pub space_key: Option<String>,
    /// Default parent page for new pages.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Account name for Basic authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// API token for Basic authentication.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Personal access token for Bearer authentication.
    #[serde(default)]
    pub token: Option<String>,
}

/// Resolved authentication settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// `Authorization: Basic base64(username:api_token)`.
    Basic {
        /// Account name.
        username: String,
        /// API token.
        api_token: String,
    },
    /// `Authorization: Bearer token`.
    Bearer {
        /// Personal access token.
        token: String,
    },
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        if let Some(space_key) = &self.space_key {
            require_non_empty(space_key, "confluence.space_key")?;
        }
        self.auth()?;
        Ok(())
    }

    /// Select the authentication scheme.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no scheme or more than one is configured.
    pub fn auth(&self) -> Result<AuthConfig, ConfigError> {
        let username = self.username.as_deref().filter(|s| !s.is_empty());
        let api_token = self.api_token.as_deref().filter(|s| !s.is_empty());
        let token = self.token.as_deref().filter(|s| !s.is_empty());

        match (username, api_token, token) {
            (Some(username), Some(api_token), None) => Ok(AuthConfig::Basic {
                username: username.to_owned(),
                api_token: api_token.to_owned(),
            }),
            (None, None, Some(token)) => Ok(AuthConfig::Bearer {
                token: token.to_owned(),
            }),
            (_, _, Some(_)) => Err(ConfigError::Validation(
                "confluence.token cannot be combined with confluence.username/api_token".to_owned(),
            )),
            (Some(_), None, None) => Err(ConfigError::Validation(
                "confluence.username requires confluence.api_token".to_owned(),
            )),
            (None, Some(_), None) => Err(ConfigError::Validation(
                "confluence.api_token requires confluence.username".to_owned(),
            )),
            (None, None, None) => Err(ConfigError::Validation(
                "confluence authentication required: set username and api_token, or token"
                    .to_owned(),
            )),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_API_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `confmark.toml` in current directory and parents.
    /// Without a file the default (empty) configuration is returned.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let Some(confluence) = self.confluence.as_mut() else {
            return;
        };
        if let Some(base_url) = &settings.base_url {
            confluence.base_url.clone_from(base_url);
        }
        if let Some(space_key) = &settings.space_key {
            confluence.space_key = Some(space_key.clone());
        }
        if let Some(parent_id) = &settings.parent_id {
            confluence.parent_id = Some(parent_id.clone());
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// Returns the Confluence config if the `[confluence]` section is present
    /// and all fields are valid. Use this instead of accessing the `confluence`
    /// field directly when the command requires Confluence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(confluence) = &self.confluence {
            confluence.validate()?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            expand::expand_opt(&mut confluence.username, "confluence.username")?;
            expand::expand_opt(&mut confluence.api_token, "confluence.api_token")?;
            expand::expand_opt(&mut confluence.token, "confluence.token")?;
        }
        Ok(())
    }
}

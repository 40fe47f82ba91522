//! # Application Configuration
//!
//! This module manages client configuration loaded from environment variables
//! (after an optional `.env` file). Configuration is validated on startup to
//! fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let root = config.api_root();
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].
//!
//! ## Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ADMIN_API_BASE_URL` | `http://127.0.0.1:8080` |
//! | `ADMIN_API_DOMAIN` | `api/v1` |
//! | `ADMIN_REQUEST_TIMEOUT_SECS` | `10` |
//! | `ADMIN_SKIP_BROWSER_WARNING` | `true` |
//! | `ADMIN_PAGE_SIZE` | `100` |
//! | `ADMIN_SORT_BY` | `createdAt` |
//! | `ADMIN_LOCALE` | `en` |
//! | `ADMIN_ERROR_DISMISS_SECS` | `3` |
//! | `IDENTITY_API_KEY` | unset |
//! | `IDENTITY_PROJECT_ID` | unset |

use std::str::FromStr;
use std::sync::OnceLock;

use lib_utils::envs::{self, get_env_flag, get_env_or};

use crate::error::{ConfigError, Result};

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "es" | "es-es" | "es-mx" => Ok(Locale::Es),
            other => Err(ConfigError::InvalidValue {
                name: "ADMIN_LOCALE",
                reason: format!("unsupported locale '{other}'"),
            }),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, e.g. `https://api.example.com`
    pub api_base_url: String,

    /// Domain path segment appended to the origin, e.g. `api/v1`
    pub api_domain: String,

    /// Per-request timeout in seconds.
    ///
    /// Valid range: 1-300
    pub request_timeout_secs: u64,

    /// Send `ngrok-skip-browser-warning: true` with every API request
    pub skip_browser_warning: bool,

    /// `size` query parameter for list loads (1-1000)
    pub page_size: u32,

    /// `sortBy` query parameter for list loads
    pub sort_by: String,

    pub locale: Locale,

    /// Delay before the unexpected-API-error banner dismisses itself
    pub error_dismiss_secs: u64,

    /// Identity provider web API key, required for sign-up only
    pub identity_api_key: Option<String>,

    pub identity_project_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            api_domain: "api/v1".to_string(),
            request_timeout_secs: 10,
            skip_browser_warning: true,
            page_size: 100,
            sort_by: "createdAt".to_string(),
            locale: Locale::En,
            error_dismiss_secs: 3,
            identity_api_key: None,
            identity_project_id: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let defaults = Self::default();

        Ok(Self {
            api_base_url: get_env_or("ADMIN_API_BASE_URL", &defaults.api_base_url),
            api_domain: get_env_or("ADMIN_API_DOMAIN", &defaults.api_domain),
            request_timeout_secs: parse_or("ADMIN_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            skip_browser_warning: get_env_flag("ADMIN_SKIP_BROWSER_WARNING", defaults.skip_browser_warning),
            page_size: parse_or("ADMIN_PAGE_SIZE", defaults.page_size)?,
            sort_by: get_env_or("ADMIN_SORT_BY", &defaults.sort_by),
            locale: get_env_or("ADMIN_LOCALE", "en").parse()?,
            error_dismiss_secs: parse_or("ADMIN_ERROR_DISMISS_SECS", defaults.error_dismiss_secs)?,
            identity_api_key: envs::get_env("IDENTITY_API_KEY").ok(),
            identity_project_id: envs::get_env("IDENTITY_PROJECT_ID").ok(),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("ADMIN_API_BASE_URL must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "ADMIN_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ConfigError::Invalid(
                "ADMIN_REQUEST_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        if !(1..=1000).contains(&self.page_size) {
            return Err(ConfigError::Invalid(
                "ADMIN_PAGE_SIZE must be between 1 and 1000".to_string(),
            ));
        }

        Ok(())
    }

    /// `{base}/{domain}` with exactly one slash between segments and none trailing.
    pub fn api_root(&self) -> String {
        let base = self.api_base_url.trim().trim_end_matches('/');
        let domain = self.api_domain.trim().trim_matches('/');
        if domain.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{domain}")
        }
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T> {
    match envs::get_env_parse::<T>(name) {
        Ok(value) => Ok(value),
        Err(envs::Error::MissingEnv(_)) => Ok(default),
        Err(envs::Error::WrongFormat(_)) => Err(ConfigError::InvalidValue {
            name,
            reason: "not a number".to_string(),
        }),
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(core_config())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG.get().expect("Config must be initialized with init_config() before use")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_root(), "http://127.0.0.1:8080/api/v1");
    }

    #[test]
    fn test_api_root_normalizes_slashes() {
        let config = Config {
            api_base_url: "https://api.example.com/".to_string(),
            api_domain: "/partner/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_root(), "https://api.example.com/partner");

        let bare = Config {
            api_domain: String::new(),
            ..Config::default()
        };
        assert_eq!(bare.api_root(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_validation_rules() {
        let bad_scheme = Config {
            api_base_url: "ftp://example.com".to_string(),
            ..Config::default()
        };
        assert!(bad_scheme.validate().is_err());

        let zero_timeout = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(zero_timeout.validate().is_err());

        let huge_page = Config {
            page_size: 5000,
            ..Config::default()
        };
        assert!(huge_page.validate().is_err());
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}

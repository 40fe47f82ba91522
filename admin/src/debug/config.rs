//! Debug configuration from environment variables

use std::path::PathBuf;

use lib_utils::{get_env_flag, get_env_or};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "partner_admin=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log directory (daily rotation)
    pub log_dir: PathBuf,
    /// File name prefix inside `log_dir`
    pub log_file_name: String,
    /// Log level filter (e.g., "partner_admin=debug,info")
    pub log_level: String,
    /// Mirror log lines to stderr
    pub log_to_stderr: bool,
    /// Emit JSON lines instead of the human-readable format in the file
    pub json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file_name: "partner-admin.log".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: true,
            json: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_dir: PathBuf::from(get_env_or("ADMIN_LOG_DIR", "logs")),
            log_file_name: defaults.log_file_name,
            log_level: get_env_or("RUST_LOG", DEFAULT_LOG_LEVEL),
            log_to_stderr: get_env_flag("ADMIN_LOG_STDERR", true),
            json: get_env_flag("ADMIN_LOG_JSON", false),
        }
    }

    /// Full path of the current (un-rotated) log file
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DebugConfig::default();
        assert_eq!(config.log_file(), PathBuf::from("logs/partner-admin.log"));
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_debug_detection() {
        let config = DebugConfig {
            log_level: "partner_admin=debug".to_string(),
            ..Default::default()
        };
        assert!(config.is_debug_enabled());
    }
}

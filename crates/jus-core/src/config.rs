//! Configuration management for the gazette monitor.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/jusgestao/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Outbound HTTP behaviour
    pub proxy: ProxyConfig,
    /// Batch and extraction behaviour
    pub scanning: ScanningConfig,
    /// Gazette site registry source
    pub gazettes: GazetteConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JUS_PROXY_TIMEOUT_SECS`: Override the per-request timeout
    /// - `JUS_BATCH_PAUSE_MS`: Override the pause between batches
    /// - `JUS_GAZETTES_DIR`: Load gazette definitions from this directory
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (usually the process environment).
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("JUS_PROXY_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.proxy.timeout_secs = secs;
                tracing::debug!("Override proxy.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("JUS_BATCH_PAUSE_MS") {
            if let Ok(ms) = val.parse() {
                self.scanning.batch_pause_ms = ms;
                tracing::debug!("Override scanning.batch_pause_ms from env: {}", ms);
            }
        }

        if let Some(val) = lookup("JUS_GAZETTES_DIR") {
            if !val.is_empty() {
                tracing::debug!("Override gazettes.definitions_dir from env: {}", val);
                self.gazettes.definitions_dir = Some(PathBuf::from(val));
            }
        }
    }

    /// Check values that would make a scan meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.proxy.timeout_secs == 0 {
            return Err(invalid("proxy.timeout_secs", "must be greater than zero"));
        }
        if self.scanning.batch_size == 0 {
            return Err(invalid("scanning.batch_size", "must be greater than zero"));
        }
        if self.scanning.max_content_chars == 0 {
            return Err(invalid(
                "scanning.max_content_chars",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| invalid("config_path", "no parent directory"))?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jusgestao/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("br", "jusgestao", "jusgestao").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Minimum spacing between requests early in a run
    pub base_delay_ms: u64,
    /// Spacing once more than `medium_after_requests` have been issued
    pub medium_delay_ms: u64,
    /// Spacing once more than `high_after_requests` have been issued
    pub high_delay_ms: u64,
    /// Request count above which `medium_delay_ms` applies
    pub medium_after_requests: u32,
    /// Request count above which `high_delay_ms` applies
    pub high_after_requests: u32,
    /// `Accept-Language` header sent with every request
    pub accept_language: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            base_delay_ms: 1000,
            medium_delay_ms: 2000,
            high_delay_ms: 3000,
            medium_after_requests: 5,
            high_after_requests: 10,
            accept_language: "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
        }
    }
}

/// Scanning behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Number of sites fetched concurrently per batch
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    pub batch_pause_ms: u64,
    /// Pages shorter than this are treated as empty
    pub min_page_length: usize,
    /// Matches kept per name per site
    pub max_matches_per_name: usize,
    /// Characters of context kept on each side of a match
    pub context_radius: usize,
    /// Maximum characters in an extracted snippet
    pub max_content_chars: usize,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            batch_pause_ms: 5000,
            min_page_length: 1000,
            max_matches_per_name: 2,
            context_radius: 300,
            max_content_chars: 1200,
        }
    }
}

/// Gazette registry settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GazetteConfig {
    /// Directory of TOML site definitions replacing the built-in registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions_dir: Option<PathBuf>,
}

//! Configuration loading for worldprotect
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Blacklist file location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlacklistConfig {
    /// Path to the blacklist text file
    pub path: String,
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            path: "worldprotect-blacklist.txt".to_string(),
        }
    }
}

/// Item name resolution
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ItemsConfig {
    /// Extra `[items] name = id` table merged over the classic names
    pub table: Option<String>,
}

/// Blacklist audit log
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Echo audit records to the console
    pub console: bool,

    /// JSONL audit file
    pub file: Option<String>,

    /// Roll the audit file over once it reaches this many bytes (0 = never)
    pub file_limit: u64,

    /// Number of audit files to keep, including the active one
    pub file_count: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: None,
            file_limit: 5 * 1024 * 1024,
            file_count: 10,
        }
    }
}

impl AuditConfig {
    /// Get the audit file path (expanded), ignoring blank values
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(Config::expand_path)
    }
}

/// Diagnostic logging
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub blacklist: BlacklistConfig,
    pub items: ItemsConfig,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the first standard location that exists, or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // Server directory
            Some(PathBuf::from("worldprotect.toml")),
            // User-specific config
            dirs::config_dir().map(|p| p.join("worldprotect/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/worldprotect/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the blacklist path (expanded)
    pub fn blacklist_path(&self) -> PathBuf {
        Self::expand_path(&self.blacklist.path)
    }

    /// Get the item table path (expanded)
    pub fn item_table_path(&self) -> Option<PathBuf> {
        self.items.table.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[blacklist]
path = "worldprotect-blacklist.txt"

[items]

[audit]
console = true
file_limit = 5242880
file_count = 10

[logging]
level = "info"
"#;

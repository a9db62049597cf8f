//! Config load, env overrides, validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default capacity of the bounded outbound queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Root config: optional files restriction and outbound queue settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub files: Option<FilesConfig>,
    pub outbound: Option<OutboundConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilesConfig {
    /// Absolute directory the send_file tool may read from. Unset = no restriction.
    pub allowed_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutboundConfig {
    pub queue_capacity: Option<usize>,
}

impl Config {
    /// Allowed directory for file sending, if restricted.
    #[inline]
    pub fn allowed_dir(&self) -> Option<PathBuf> {
        self.files
            .as_ref()
            .and_then(|f| f.allowed_dir.as_deref())
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
    }

    /// Outbound queue capacity (default 32).
    #[inline]
    pub fn queue_capacity(&self) -> usize {
        self.outbound
            .as_ref()
            .and_then(|o| o.queue_capacity)
            .unwrap_or(DEFAULT_QUEUE_CAPACITY)
    }
}

/// Errors from config load or validation.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(s) => write!(f, "config io: {}", s),
            ConfigError::Parse(s) => write!(f, "config parse: {}", s),
            ConfigError::Validation(s) => write!(f, "config invalid: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Default config path: `~/.filedrop/config.toml` (falls back to relative path without HOME).
pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    Path::new(&home).join(".filedrop").join("config.toml")
}

/// Load config from `path`. Missing file yields defaults; env overrides are
/// applied before validation (`FILEDROP_ALLOWED_DIR`, `FILEDROP_QUEUE_CAPACITY`).
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?
    } else {
        Config::default()
    };
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(dir) = std::env::var("FILEDROP_ALLOWED_DIR") {
        if !dir.is_empty() {
            cfg.files.get_or_insert_with(Default::default).allowed_dir = Some(dir);
        }
    }
    if let Ok(cap) = std::env::var("FILEDROP_QUEUE_CAPACITY") {
        if let Ok(cap) = cap.parse::<usize>() {
            cfg.outbound
                .get_or_insert_with(Default::default)
                .queue_capacity = Some(cap);
        }
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = cfg.allowed_dir() {
        if !dir.is_absolute() {
            return Err(ConfigError::Validation(format!(
                "files.allowed-dir must be an absolute path, got '{}'",
                dir.display()
            )));
        }
    }
    if cfg.queue_capacity() == 0 {
        return Err(ConfigError::Validation(
            "outbound.queue-capacity must be at least 1".into(),
        ));
    }
    Ok(())
}

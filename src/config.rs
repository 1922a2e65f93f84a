use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::paths;
use crate::ui::paginator::ScrollDamping;

/// Persistent user preferences, read from `config.toml`.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_scroll_max_pointer")]
    pub scroll_max_pointer: usize,
    #[serde(default = "default_scroll_max_jump")]
    pub scroll_max_jump: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_page_size() -> usize {
    7
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_message() -> String {
    "Select a directory".to_string()
}
fn default_scroll_max_pointer() -> usize {
    3
}
fn default_scroll_max_jump() -> usize {
    9
}
fn default_log_level() -> String {
    "dirnav=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            theme: default_theme(),
            message: default_message(),
            scroll_max_pointer: default_scroll_max_pointer(),
            scroll_max_jump: default_scroll_max_jump(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dirnav")
            .join("config.toml")
    }

    pub fn damping(&self) -> ScrollDamping {
        ScrollDamping {
            max_pointer: self.scroll_max_pointer,
            max_jump: self.scroll_max_jump,
        }
    }
}

/// Where one prompt session is rooted and where it starts.
#[derive(Clone, Debug, Default)]
pub struct PromptConfig {
    /// Root the user cannot leave. Required.
    pub base_path: Option<PathBuf>,
    /// Used to resolve relative paths; defaults to the process directory.
    pub cwd: Option<PathBuf>,
    /// Defaults to `base_path`.
    pub start_path: Option<PathBuf>,
    pub page_size: Option<usize>,
}

impl PromptConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
            ..Self::default()
        }
    }

    /// Absolute, normalized working directory for this session.
    pub fn resolved_cwd(&self) -> Result<PathBuf, ConfigurationError> {
        match self.cwd.as_deref() {
            Some(cwd) if cwd.is_absolute() => Ok(paths::normalize(cwd)),
            cwd => {
                let process_cwd = env::current_dir().map_err(ConfigurationError::WorkingDirectory)?;
                Ok(paths::absolutize(cwd.unwrap_or(Path::new(".")), &process_cwd))
            }
        }
    }

    /// Window height, never below one row.
    pub fn page_size_or(&self, fallback: usize) -> usize {
        self.page_size.unwrap_or(fallback).max(1)
    }
}

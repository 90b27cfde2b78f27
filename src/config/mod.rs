//! Configuration module
//!
//! Lookup order:
//! 1. `--config` / `TECHSOL_CONFIG`
//! 2. Local `.techsol/config.toml` (walking up from CWD)
//! 3. Platform config dir (`~/.config/techsol/config.toml` on Linux)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::render::DEFAULT_DOCUMENT_TITLE;
use crate::core::template::Template;
use crate::mcp::server::DEFAULT_SERVER_NAME;

/// Environment variable overriding the template file
pub const TEMPLATE_ENV: &str = "TECHSOL_TEMPLATE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub document: DocumentConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentConfig {
    /// Top heading of the Markdown view
    #[serde(default = "default_title")]
    pub title: String,

    /// Custom template file (.toml or .json); built-in template when unset
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            template: None,
        }
    }
}

fn default_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Name reported in the MCP handshake
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

impl Config {
    /// Load config, preferring an explicit file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Find local .techsol/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(".techsol").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Platform config file path
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "techsol").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Template file with priority: TECHSOL_TEMPLATE, then config
    pub fn template_path(&self) -> Option<PathBuf> {
        std::env::var_os(TEMPLATE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.document.template.clone())
    }

    /// Resolve the template the store should start from
    pub fn template(&self, override_path: Option<&Path>) -> Result<Template> {
        let path = override_path.map(Path::to_path_buf).or_else(|| self.template_path());

        match path {
            Some(path) => Template::load(&path)
                .with_context(|| format!("Failed to load template {}", path.display())),
            None => Ok(Template::default()),
        }
    }
}

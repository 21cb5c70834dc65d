// src/core/config_manager.rs
//! Unified configuration: YAML file per environment, environment variables as fallback

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    /// File the settings were read from; `None` for environment variables or inline YAML
    pub config_file: Option<PathBuf>,
    pub server: ServerSettings,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub search_url: String,
    pub timeout_seconds: u64,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_file: None,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    server: ServerSettings,
    service: ServiceConfig,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load configuration from `path` (or `config.yaml`), falling back to env vars
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();

        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let mut config = Self::from_yaml_str(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            config.config_file = Some(config_path);
            config
        } else if path.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        } else {
            Self::from_env(&environment)?
        };

        config.validate()?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Parse a YAML document with `local` and `production` sections
    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(Self {
            environment: environment.to_string(),
            config_file: None,
            server: section.server,
            service: section.service,
        })
    }

    fn from_env(environment: &str) -> Result<Self> {
        let server = ServerSettings {
            port: env_or("PORT", DEFAULT_PORT)?,
            log_file: std::env::var("LOG_FILE").ok().map(PathBuf::from),
        };

        let service = ServiceConfig {
            search_url: std::env::var("SEARCH_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string()),
            timeout_seconds: env_or("SEARCH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            default_page_size: env_or("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            max_page_size: env_or("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?,
        };

        Ok(Self {
            environment: environment.to_string(),
            config_file: None,
            server,
            service,
        })
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.service.search_url.trim().is_empty() {
            anyhow::bail!("service.search_url must not be empty");
        }
        if self.service.timeout_seconds == 0 {
            anyhow::bail!("service.timeout_seconds must be at least 1");
        }
        if self.service.default_page_size == 0 || self.service.max_page_size == 0 {
            anyhow::bail!("page sizes must be at least 1");
        }
        if self.service.default_page_size > self.service.max_page_size {
            anyhow::bail!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.service.default_page_size,
                self.service.max_page_size
            );
        }
        Ok(())
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} must be a valid number: {}", name, e)),
        Err(_) => Ok(default),
    }
}

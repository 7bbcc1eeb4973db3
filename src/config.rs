use crate::cli::Cli;
use crate::http_client::HttpClientConfig;
use crate::logger::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_NAMES: [&str; 4] = [
    "sitemap-diff.toml",
    "sitemap-diff.json",
    ".sitemap-diff.toml",
    ".sitemap-diff.json",
];

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
    pub compare: CompareConfig,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// HTTP request timeout in seconds, unset waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// User agent sent with sitemap requests
    pub user_agent: String,
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Region used for S3 locations without a `:region://` suffix
    pub default_region: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Diagnostic level name or alias
    pub log_level: String,
}

/// Comparison configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CompareConfig {
    /// Paths dropped from both sitemaps before comparing
    pub exclude_paths: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let http = HttpClientConfig::default();
        Self {
            timeout_seconds: http.timeout_seconds,
            user_agent: http.user_agent,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default().to_string(),
        }
    }
}

impl Config {
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout_seconds: self.network.timeout_seconds,
            user_agent: self.network.user_agent.clone(),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub async fn load_config(cli: &Cli) -> Result<Config> {
        let mut config = Config::default();

        if let Some(config_path) = &cli.config {
            let file_config = Self::load_from_file(config_path).await?;
            config = Self::merge_configs(config, file_config);
        } else if let Some(found_config) = Self::find_config_file().await? {
            config = Self::merge_configs(config, found_config);
        }

        config = Self::apply_environment_overrides(config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub async fn load_from_file(path: &Path) -> Result<Config> {
        let content = tokio::fs::read_to_string(path).await?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub async fn find_config_file() -> Result<Option<Config>> {
        let mut candidates: Vec<PathBuf> = CONFIG_NAMES.iter().map(PathBuf::from).collect();
        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("sitemap-diff");
            candidates.extend(CONFIG_NAMES.iter().map(|name| app_config_dir.join(name)));
        }

        for path in candidates {
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path).await?));
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides using the system environment
    pub fn apply_environment_overrides(config: Config) -> Result<Config> {
        Self::apply_environment_overrides_with(&SystemEnvProvider, config)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(timeout) = env.get("SITEMAP_DIFF_TIMEOUT") {
            config.network.timeout_seconds = Some(timeout.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid SITEMAP_DIFF_TIMEOUT value: {}", timeout))
            })?);
        }

        if let Some(user_agent) = env.get("SITEMAP_DIFF_USER_AGENT") {
            config.network.user_agent = user_agent;
        }

        if let Some(region) = env.get("SITEMAP_DIFF_REGION") {
            config.storage.default_region = Some(region).filter(|r| !r.is_empty());
        }

        if let Some(log_level) = env.get("SITEMAP_DIFF_LOG_LEVEL") {
            log_level.parse::<LogLevel>().map_err(|_| {
                ConfigError::Environment(format!(
                    "Invalid SITEMAP_DIFF_LOG_LEVEL value: {}",
                    log_level
                ))
            })?;
            config.output.log_level = log_level;
        }

        if let Some(exclude) = env.get("SITEMAP_DIFF_EXCLUDE") {
            config.compare.exclude_paths = split_list(&exclude);
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if let Some(log_level) = cli.log_level() {
            config.output.log_level = log_level.to_string();
        }
        if let Some(exclude_paths) = cli.get_exclude_paths() {
            config.compare.exclude_paths = exclude_paths;
        }
        config
    }

    /// Merge two configurations (second takes precedence for set values)
    pub fn merge_configs(mut base: Config, override_config: Config) -> Config {
        if override_config.network.timeout_seconds.is_some() {
            base.network.timeout_seconds = override_config.network.timeout_seconds;
        }
        if !override_config.network.user_agent.is_empty() {
            base.network.user_agent = override_config.network.user_agent;
        }

        if override_config.storage.default_region.is_some() {
            base.storage.default_region = override_config.storage.default_region;
        }

        base.output.log_level = override_config.output.log_level;

        if !override_config.compare.exclude_paths.is_empty() {
            base.compare.exclude_paths = override_config.compare.exclude_paths;
        }

        base
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if config.network.timeout_seconds == Some(0) {
            return Err(ConfigError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if config.network.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "User agent must not be empty".to_string(),
            ));
        }

        if config.output.log_level.parse::<LogLevel>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Unknown log level: {}",
                config.output.log_level
            )));
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::output::{OutputConfig, OutputFormat};
use super::query::QueryConfig;
use super::resolver::ResolverConfig;

pub const DEFAULT_CONFIG_FILE: &str = "ferrous-lookup.toml";
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const ENV_RESOLVER_ADDRESS: &str = "DNS_ADDR";
pub const ENV_RESOLVER_PORT: &str = "DNS_PORT";
pub const ENV_DEBUG: &str = "DEBUG";

/// Main configuration structure for Ferrous Lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolver the queries are sent to
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Per-query deadline, concurrency bound and forward mode
    #[serde(default)]
    pub query: QueryConfig,

    /// Report rendering
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order (later wins):
    /// 1. Explicitly provided path, else ferrous-lookup.toml, else defaults
    /// 2. Environment (DNS_ADDR, DNS_PORT, DEBUG), falling back to `.env`
    /// 3. Command-line overrides
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        let dotenv = read_env_file(Path::new(DEFAULT_ENV_FILE))?;
        config.apply_env_overrides(|key| {
            std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
        })?;
        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment overrides, read through `lookup`
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(address) = read(ENV_RESOLVER_ADDRESS) {
            self.resolver.address = address.trim().parse().map_err(|_| {
                ConfigError::Environment(ENV_RESOLVER_ADDRESS.to_string(), address.clone())
            })?;
        }
        if let Some(port) = read(ENV_RESOLVER_PORT) {
            self.resolver.port = port.trim().parse().map_err(|_| {
                ConfigError::Environment(ENV_RESOLVER_PORT.to_string(), port.clone())
            })?;
        }
        if let Some(debug) = read(ENV_DEBUG) {
            self.logging.debug = parse_bool(&debug)
                .ok_or_else(|| ConfigError::Environment(ENV_DEBUG.to_string(), debug.clone()))?;
        }
        Ok(())
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.resolver.address = server;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(record_type) = overrides.record_type {
            self.query.record_type = record_type;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.query.timeout_ms = timeout_ms;
        }
        if let Some(max_in_flight) = overrides.max_in_flight {
            self.query.max_in_flight = max_in_flight;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.debug {
            self.logging.debug = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.port == 0 {
            return Err(ConfigError::Validation("Resolver port cannot be 0".to_string()));
        }

        if self.query.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.query.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "max_in_flight must be greater than 0".to_string(),
            ));
        }

        if self.query.forward_type().is_none() {
            return Err(ConfigError::Validation(format!(
                "Unsupported forward record type '{}' (expected A or AAAA)",
                self.query.record_type
            )));
        }

        Ok(())
    }
}

/// Reads `KEY=VALUE` pairs from a dotenv file without touching the process
/// environment. A missing file yields no pairs.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;

    let mut values = HashMap::new();
    for entry in entries {
        let (key, value) = entry.map_err(|e| {
            ConfigError::Parse(format!("{}: {}", path.display(), e))
        })?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Accepts the usual boolean spellings: 1/0, t/f, true/false, yes/no, on/off.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<IpAddr>,
    pub port: Option<u16>,
    pub record_type: Option<String>,
    pub timeout_ms: Option<u64>,
    pub max_in_flight: Option<usize>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub debug: bool,
}

//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SUMMEVAL_*` environment variables
//! (the server also loads a `.env` file before reading them).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_BATCH_SIZE;
use crate::embedding::DeviceRequest;
use crate::scoring::ScoringMethod;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SUMMEVAL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// Sentence encoder directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// When unset the embedder runs in stub mode.
    pub model_path: Option<PathBuf>,

    /// Compute device for the model (`auto`, `cpu`, `metal`, `cuda`). Default: auto.
    pub device: DeviceRequest,

    /// Method used when a request does not name one. Default: embedding.
    pub scoring_method: ScoringMethod,

    /// Upper bound on pairs accepted by `/batch-evaluate`. Default: `100`.
    pub max_batch_size: usize,

    /// JSON file with the video catalog. When unset the built-in catalog is used.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            model_path: None,
            device: DeviceRequest::Auto,
            scoring_method: ScoringMethod::Embedding,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            catalog_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SUMMEVAL_PORT";
    const ENV_PORT_FALLBACK: &'static str = "PORT";
    const ENV_BIND_ADDR: &'static str = "SUMMEVAL_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "SUMMEVAL_MODEL_PATH";
    const ENV_DEVICE: &'static str = "SUMMEVAL_DEVICE";
    const ENV_SCORING_METHOD: &'static str = "SUMMEVAL_SCORING_METHOD";
    const ENV_MAX_BATCH_SIZE: &'static str = "SUMMEVAL_MAX_BATCH_SIZE";
    const ENV_CATALOG_PATH: &'static str = "SUMMEVAL_CATALOG_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let device = Self::parse_device_from_env(defaults.device)?;
        let scoring_method = Self::parse_scoring_method_from_env(defaults.scoring_method)?;
        let max_batch_size = Self::parse_batch_size_from_env(defaults.max_batch_size)?;
        let catalog_path = Self::parse_optional_path_from_env(Self::ENV_CATALOG_PATH);

        Ok(Self {
            port,
            bind_addr,
            model_path,
            device,
            scoring_method,
            max_batch_size,
            catalog_path,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.catalog_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                value: self.max_batch_size.to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        let raw = env::var(Self::ENV_PORT).or_else(|_| env::var(Self::ENV_PORT_FALLBACK));
        match raw {
            Ok(value) => {
                let port: u16 = value.trim().parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_device_from_env(default: DeviceRequest) -> Result<DeviceRequest, ConfigError> {
        match env::var(Self::ENV_DEVICE) {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .map_err(|_| ConfigError::InvalidDevice { value }),
            _ => Ok(default),
        }
    }

    fn parse_scoring_method_from_env(default: ScoringMethod) -> Result<ScoringMethod, ConfigError> {
        match env::var(Self::ENV_SCORING_METHOD) {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .map_err(|_| ConfigError::InvalidScoringMethod { value }),
            _ => Ok(default),
        }
    }

    fn parse_batch_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_MAX_BATCH_SIZE) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => Ok(size),
                _ => Err(ConfigError::InvalidBatchSize { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

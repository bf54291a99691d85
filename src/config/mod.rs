//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CREDENCE_*` environment variables.
//! The classifier artifact and one of `CREDENCE_EMBEDDER_PATH` /
//! `CREDENCE_EMBEDDER_STUB` are required; see [`Config::validate`].

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_OCR_BINARY, DEFAULT_OCR_LANGUAGE,
    DEFAULT_TRUSTED_DOMAINS,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CREDENCE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the BERT checkpoint (`config.json`, `model.safetensors`,
    /// `tokenizer.json`).
    pub embedder_path: Option<PathBuf>,

    /// Run the deterministic stub embedder instead of loading a model.
    pub embedder_stub: bool,

    /// Output dimension of the stub embedder. Default: `768`.
    pub embedding_dim: usize,

    /// Path to the logistic-regression JSON artifact.
    pub classifier_path: Option<PathBuf>,

    /// OCR engine executable. Default: `tesseract`.
    pub ocr_binary: PathBuf,

    /// OCR language code. Default: `eng`.
    pub ocr_language: String,

    /// Where OCR scratch images are written. `None` uses the system temp dir.
    pub scratch_dir: Option<PathBuf>,

    /// Domain substrings treated as trusted sources.
    pub trusted_domains: Vec<String>,

    /// Max request body size in bytes. Default: 10 MiB.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            embedder_path: None,
            embedder_stub: false,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            classifier_path: None,
            ocr_binary: PathBuf::from(DEFAULT_OCR_BINARY),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            scratch_dir: None,
            trusted_domains: DEFAULT_TRUSTED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CREDENCE_PORT";
    const ENV_BIND_ADDR: &'static str = "CREDENCE_BIND_ADDR";
    const ENV_EMBEDDER_PATH: &'static str = "CREDENCE_EMBEDDER_PATH";
    const ENV_EMBEDDER_STUB: &'static str = "CREDENCE_EMBEDDER_STUB";
    const ENV_EMBEDDING_DIM: &'static str = "CREDENCE_EMBEDDING_DIM";
    const ENV_CLASSIFIER_PATH: &'static str = "CREDENCE_CLASSIFIER_PATH";
    const ENV_OCR_BINARY: &'static str = "CREDENCE_OCR_BINARY";
    const ENV_OCR_LANGUAGE: &'static str = "CREDENCE_OCR_LANGUAGE";
    const ENV_SCRATCH_DIR: &'static str = "CREDENCE_SCRATCH_DIR";
    const ENV_TRUSTED_DOMAINS: &'static str = "CREDENCE_TRUSTED_DOMAINS";
    const ENV_MAX_UPLOAD_BYTES: &'static str = "CREDENCE_MAX_UPLOAD_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let embedder_stub = Self::parse_bool_from_env(Self::ENV_EMBEDDER_STUB)?;
        let embedding_dim =
            Self::parse_usize_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let classifier_path = Self::parse_optional_path_from_env(Self::ENV_CLASSIFIER_PATH);
        let ocr_binary = Self::parse_path_from_env(Self::ENV_OCR_BINARY, defaults.ocr_binary);
        let ocr_language =
            Self::parse_string_from_env(Self::ENV_OCR_LANGUAGE, defaults.ocr_language);
        let scratch_dir = Self::parse_optional_path_from_env(Self::ENV_SCRATCH_DIR);
        let trusted_domains = Self::parse_list_from_env(
            Self::ENV_TRUSTED_DOMAINS,
            defaults.trusted_domains,
        );
        let max_upload_bytes =
            Self::parse_usize_from_env(Self::ENV_MAX_UPLOAD_BYTES, defaults.max_upload_bytes)?;

        Ok(Self {
            port,
            bind_addr,
            embedder_path,
            embedder_stub,
            embedding_dim,
            classifier_path,
            ocr_binary,
            ocr_language,
            scratch_dir,
            trusted_domains,
            max_upload_bytes,
        })
    }

    /// Validates paths and basic invariants (does not load any model).
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.embedder_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::PathNotFound {
                        name: Self::ENV_EMBEDDER_PATH,
                        path: path.clone(),
                    });
                }
                if !path.is_dir() {
                    return Err(ConfigError::NotADirectory {
                        name: Self::ENV_EMBEDDER_PATH,
                        path: path.clone(),
                    });
                }
            }
            None if !self.embedder_stub => {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_EMBEDDER_PATH,
                });
            }
            None => {}
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBEDDING_DIM,
                reason: "must be greater than zero".to_string(),
            });
        }

        let Some(path) = &self.classifier_path else {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_CLASSIFIER_PATH,
            });
        };
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                name: Self::ENV_CLASSIFIER_PATH,
                path: path.clone(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                name: Self::ENV_CLASSIFIER_PATH,
                path: path.clone(),
            });
        }

        if let Some(dir) = &self.scratch_dir
            && !dir.is_dir()
        {
            return Err(ConfigError::NotADirectory {
                name: Self::ENV_SCRATCH_DIR,
                path: dir.clone(),
            });
        }

        if self.ocr_language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_OCR_LANGUAGE,
                reason: "must not be empty".to_string(),
            });
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_UPLOAD_BYTES,
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
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

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(value) => value
                .split(',')
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            Err(_) => default,
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    name: var_name,
                    reason: format!("'{}': {}", value, e),
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "" | "0" | "false" | "no" | "off" => Ok(false),
                other => Err(ConfigError::InvalidValue {
                    name: var_name,
                    reason: format!("'{}' is not a boolean", other),
                }),
            },
            Err(_) => Ok(false),
        }
    }
}

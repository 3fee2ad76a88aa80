//! Server configuration.
//!
//! Reads config from env vars (a `.env` file is honoured):
//!   LEMMA_BIND_ADDR  - listen address (default: 0.0.0.0:8000)
//!   LEMMA_MODEL_DIR  - directory holding lexicon.tsv (default: ./data)
//!   LEMMA_CACHE_DIR  - overlay lexicon directory (default: ./.cache/tr-lemmatizer)
//!   LEMMA_POLICY     - pos-preferring | first-candidate (default: pos-preferring)
//!   LEMMA_WARMUP     - analyze a sample sentence before serving (default: true)

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::selector::{PolicyKind, UnknownPolicy};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MODEL_DIR: &str = "./data";
pub const DEFAULT_CACHE_DIR: &str = "./.cache/tr-lemmatizer";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("LEMMA_BIND_ADDR '{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("LEMMA_POLICY: {0}")]
    Policy(#[from] UnknownPolicy),

    #[error("{var} must be a boolean, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub model_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub policy: PolicyKind,
    pub warmup: bool,
}

impl ServerConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset and blank values take
    /// the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get("LEMMA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let policy = match get("LEMMA_POLICY") {
            Some(name) => name.parse::<PolicyKind>()?,
            None => PolicyKind::default(),
        };

        let warmup = match get("LEMMA_WARMUP") {
            Some(value) => parse_bool("LEMMA_WARMUP", &value)?,
            None => true,
        };

        Ok(Self {
            bind_addr,
            model_dir: get("LEMMA_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR)),
            cache_dir: get("LEMMA_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            policy,
            warmup,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

//! Environment-derived configuration.
//!
//! Read once at process start and never mutated. Defaults point at the
//! public testnet endpoints the demo targets; every field can be
//! overridden through the environment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Node (registry submission) endpoint.
    pub algod: AlgodConfig,

    /// Indexer (query) endpoint.
    pub indexer: IndexerConfig,

    /// Pinning service credentials and endpoints.
    pub pinning: PinningConfig,
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlgodConfig {
    /// Base URL of the node's REST API.
    pub url: String,

    /// API token; empty for public endpoints.
    pub token: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            url: "https://testnet-api.algonode.cloud".to_string(),
            token: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Indexer endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Base URL of the indexer's REST API.
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: "https://testnet-idx.algonode.cloud".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Pinning service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PinningConfig {
    /// API key; required before any store call.
    pub api_key: String,

    /// API secret; required before any store call.
    pub api_secret: String,

    /// Base URL of the pinning API.
    pub base_url: String,

    /// Gateway prefix used to build retrieval URIs.
    pub gateway: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: "https://api.pinata.cloud".to_string(),
            gateway: "https://gateway.pinata.cloud".to_string(),
            timeout_secs: 30,
        }
    }
}

fn env_or(var: &str, default: String) -> String {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => v,
        _ => default,
    }
}

fn env_u64(var: &str, default: u64) -> Result<u64> {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a number: {}", var, v))),
        _ => Ok(default),
    }
}

impl Config {
    /// Build the configuration from the environment, falling back to
    /// testnet defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        Ok(Self {
            algod: AlgodConfig {
                url: env_or("ALGOD_URL", defaults.algod.url),
                token: env_or("ALGOD_TOKEN", defaults.algod.token),
                timeout_secs: env_u64("ALGOD_TIMEOUT_SECS", defaults.algod.timeout_secs)?,
            },
            indexer: IndexerConfig {
                url: env_or("INDEXER_URL", defaults.indexer.url),
                timeout_secs: env_u64("INDEXER_TIMEOUT_SECS", defaults.indexer.timeout_secs)?,
            },
            pinning: PinningConfig {
                api_key: env_or("PINATA_API_KEY", defaults.pinning.api_key),
                api_secret: env_or("PINATA_API_SECRET", defaults.pinning.api_secret),
                base_url: env_or("PINATA_API_URL", defaults.pinning.base_url),
                gateway: env_or("PINATA_GATEWAY", defaults.pinning.gateway),
                timeout_secs: env_u64("PINATA_TIMEOUT_SECS", defaults.pinning.timeout_secs)?,
            },
        })
    }
}

//! Configuration management for the AyurHerb backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AYURHERB_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Storage backend configuration
    pub storage: StorageConfig,

    /// Artificial latency of the simulated backend
    pub latency: LatencyConfig,

    /// Simulated ledger configuration
    pub ledger: LedgerConfig,

    /// Demo session token configuration
    pub jwt: JwtConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Which key-value backend holds the persisted lists
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory for the file backend, one JSON document per key
    pub data_dir: PathBuf,

    /// Total byte budget, like a browser storage quota
    pub quota_bytes: Option<usize>,

    /// Write the demo dataset when no collections exist yet
    pub seed_demo_data: bool,
}

/// Delays in milliseconds per operation weight
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub read_ms: u64,
    pub write_ms: u64,
    pub ledger_ms: u64,
    pub auth_ms: u64,
}

impl LatencyConfig {
    /// No artificial delay at all
    pub fn none() -> Self {
        Self {
            read_ms: 0,
            write_ms: 0,
            ledger_ms: 0,
            auth_ms: 0,
        }
    }

    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }

    pub fn write(&self) -> Duration {
        Duration::from_millis(self.write_ms)
    }

    pub fn ledger(&self) -> Duration {
        Duration::from_millis(self.ledger_ms)
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            read_ms: 500,
            write_ms: 1000,
            ledger_ms: 2000,
            auth_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Network name shown on receipts
    pub network: String,

    /// Fixed contract address shown on receipts
    pub contract_address: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_LEDGER_NETWORK.to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        }
    }
}

pub const DEFAULT_LEDGER_NETWORK: &str = "AyurHerb Testnet (simulated)";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x7a3b9c2d4e5f60718293a4b5c6d7e8f901a2b3c4";

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing demo session tokens
    pub secret: String,

    /// Session token expiration in seconds
    pub expiry_seconds: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AYURHERB_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.quota_bytes", 5 * 1024 * 1024)?
            .set_default("storage.seed_demo_data", true)?
            .set_default("latency.read_ms", 500)?
            .set_default("latency.write_ms", 1000)?
            .set_default("latency.ledger_ms", 2000)?
            .set_default("latency.auth_ms", 1000)?
            .set_default("ledger.network", DEFAULT_LEDGER_NETWORK)?
            .set_default("ledger.contract_address", DEFAULT_CONTRACT_ADDRESS)?
            .set_default("jwt.secret", "ayurherb-demo-secret")?
            .set_default("jwt.expiry_seconds", 86400)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AYURHERB_ prefix)
            .add_source(
                Environment::with_prefix("AYURHERB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// In-memory configuration without delays, for tests and embedding
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_dir: PathBuf::from("data"),
                quota_bytes: None,
                seed_demo_data: true,
            },
            latency: LatencyConfig::none(),
            ledger: LedgerConfig::default(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiry_seconds: 3600,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

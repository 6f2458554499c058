use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt;

#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Mongo => f.write_str("mongo"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

impl BookingConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Assemble the service settings from `lookup`, which stands in for the
    /// process environment.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");

        let backend: StoreBackend = lookup("STORE_BACKEND")
            .unwrap_or_else(|| StoreBackend::Mongo.to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        if is_prod && backend == StoreBackend::Memory {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "STORE_BACKEND=memory is not allowed in production"
            )));
        }

        let uri = non_empty(lookup("MONGO_URI"));
        if backend == StoreBackend::Mongo && uri.is_none() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MONGO_URI is required but not set"
            )));
        }

        Ok(BookingConfig {
            common,
            mongodb: MongoConfig {
                uri,
                database: non_empty(lookup("MONGODB_DATABASE")),
            },
            store: StoreConfig { backend },
            log_level: non_empty(lookup("LOG_LEVEL")).unwrap_or_else(|| "info".to_string()),
            otlp_endpoint: non_empty(lookup("OTLP_ENDPOINT")),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

use std::path::PathBuf;
use thiserror::Error;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | holds `orders.redb` and `logs/` |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_JSON | false | JSON console logs |
/// | SERVICE_FEE_PERCENT | 10 | service charge rate frozen into new tabs |
/// | CURRENCY_SYMBOL | R$ | display prefix for amounts |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/mesa SERVICE_FEE_PERCENT=12 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    /// Service charge rate in percent
    pub service_fee_percent: f64,
    pub currency_symbol: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("SERVICE_FEE_PERCENT must be between 0 and 100, got {0}")]
    InvalidServiceFee(f64),

    #[error("WORK_DIR must not be empty")]
    EmptyWorkDir,
}

impl Config {
    /// Load `.env` (if present), then read the environment
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            work_dir: get("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: get("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            service_fee_percent: get("SERVICE_FEE_PERCENT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10.0),
            currency_symbol: get("CURRENCY_SYMBOL").unwrap_or_else(|| "R$".into()),
        }
    }

    /// Override the working directory
    ///
    /// Used by tests.
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_dir.trim().is_empty() {
            return Err(ConfigError::EmptyWorkDir);
        }
        if !self.service_fee_percent.is_finite()
            || !(0.0..=100.0).contains(&self.service_fee_percent)
        {
            return Err(ConfigError::InvalidServiceFee(self.service_fee_percent));
        }
        Ok(())
    }

    /// Path of the ledger database
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("orders.redb")
    }

    /// Directory for rotating log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Format an amount with the configured currency symbol, e.g. "R$ 56.98"
    pub fn format_currency(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency_symbol, amount)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

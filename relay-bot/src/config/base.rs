//! Base config: Telegram connection, logging, storage. Loaded from env.

use anyhow::Result;
use relay_telegram::TelegramConfig;
use std::env;

/// Session and registry backends.
pub const STORAGE_TYPES: [&str; 2] = ["memory", "sqlite"];

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN, TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram: TelegramConfig,
    /// Log file path
    pub log_file: String,
    /// STORAGE_TYPE: `memory` or `sqlite`
    pub storage_type: String,
    /// SQLite database file used when `storage_type` is `sqlite`
    pub database_url: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/relay-bot.log".to_string());
        let storage_type = env::var("STORAGE_TYPE").unwrap_or_else(|_| "memory".to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "./data/relay_bot.db".to_string());

        Ok(Self {
            telegram,
            log_file,
            storage_type,
            database_url,
        })
    }

    /// Validate config: API URL must parse if set, storage type must be known.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if !STORAGE_TYPES.contains(&self.storage_type.as_str()) {
            anyhow::bail!(
                "STORAGE_TYPE must be one of {:?}, got: {}",
                STORAGE_TYPES,
                self.storage_type
            );
        }
        Ok(())
    }
}

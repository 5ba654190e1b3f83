//! Bot configuration: BaseConfig (Telegram + log + storage), ServicesConfig (provider keys) and
//! the dialog settings.

mod base;
mod services;


use anyhow::Result;
use dialog::DialogConfig;

pub use base::BaseConfig;
pub use services::{load_dialog_config, ServicesConfig};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub services: ServicesConfig,
    pub dialog: DialogConfig,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            services: ServicesConfig::load()?,
            dialog: load_dialog_config(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        let dialog = &self.dialog;
        if dialog.poll_min_answers < 2 || dialog.poll_min_answers > dialog.poll_max_answers {
            anyhow::bail!(
                "POLL_ANSWERS_MIN_NUMBER ({}) must be at least 2 and not above POLL_ANSWERS_MAX_NUMBER ({})",
                dialog.poll_min_answers,
                dialog.poll_max_answers
            );
        }
        if dialog.poll_max_answers > 10 {
            anyhow::bail!(
                "POLL_ANSWERS_MAX_NUMBER ({}) exceeds the Telegram limit of 10",
                dialog.poll_max_answers
            );
        }
        Ok(())
    }
}

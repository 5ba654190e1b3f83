//! Provider credentials and dialog settings. Loaded from env.

use anyhow::{Context, Result};
use dialog::DialogConfig;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// OPENWEATHER_API_KEY
    pub openweather_api_key: String,
    /// EXCHANGERATES_API_KEY
    pub exchangerates_api_key: String,
    /// GIPHY_API_KEY
    pub giphy_api_key: String,
    /// HTTP_TIMEOUT_SECS: bound on every provider request
    pub http_timeout_secs: u64,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} not set", name))
}

impl ServicesConfig {
    pub fn load() -> Result<Self> {
        Ok(Self {
            openweather_api_key: required("OPENWEATHER_API_KEY")?,
            exchangerates_api_key: required("EXCHANGERATES_API_KEY")?,
            giphy_api_key: required("GIPHY_API_KEY")?,
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// POLL_ANSWERS_MIN_NUMBER, POLL_ANSWERS_MAX_NUMBER, POLL_NONE_CHOICE, POLL_FINISH_CHOICE,
/// FUNNY_IMAGE_TAG; unset or unparsable values keep the defaults.
pub fn load_dialog_config() -> DialogConfig {
    let defaults = DialogConfig::default();
    let number = |name: &str, default: usize| {
        env::var(name)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    };
    DialogConfig {
        poll_min_answers: number("POLL_ANSWERS_MIN_NUMBER", defaults.poll_min_answers),
        poll_max_answers: number("POLL_ANSWERS_MAX_NUMBER", defaults.poll_max_answers),
        poll_none_choice: env::var("POLL_NONE_CHOICE").unwrap_or(defaults.poll_none_choice),
        poll_finish_choice: env::var("POLL_FINISH_CHOICE").unwrap_or(defaults.poll_finish_choice),
        image_tag: env::var("FUNNY_IMAGE_TAG").unwrap_or(defaults.image_tag),
    }
}

//! Telegram connection config: token and optional Bot API URL.
//! Loaded from BOT_TOKEN and TELEGRAM_API_URL (or TELOXIDE_API_URL).

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// `token` overrides BOT_TOKEN, which is otherwise required. TELEGRAM_API_URL /
    /// TELOXIDE_API_URL are optional.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Uses the given token and the public Bot API.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Fails when the API URL is set but not a valid URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.telegram_api_url {
            reqwest::Url::parse(url).with_context(|| format!("Invalid Telegram API URL: {}", url))?;
        }
        Ok(())
    }

    /// Builds the teloxide bot, pointed at the custom API URL when one is set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .with_context(|| format!("Invalid Telegram API URL: {}", url))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let config = TelegramConfig {
            bot_token: "t".to_string(),
            telegram_api_url: Some("not a url".to_string()),
        };
        assert!(config.validate().is_err());
        assert!(config.build_bot().is_err());
    }

    #[test]
    fn test_custom_api_url_is_used() {
        let config = TelegramConfig {
            bot_token: "t".to_string(),
            telegram_api_url: Some("http://localhost:8081".to_string()),
        };
        let bot = config.build_bot().unwrap();
        assert_eq!(bot.api_url().as_str(), "http://localhost:8081/");
    }
}

//! # providers
//!
//! One adapter per external provider. Each adapter turns a provider call into either a typed
//! success value or a [`ServiceError`] of exactly one of three kinds, so the dialog layer can
//! react without knowing anything about HTTP statuses or payload shapes.
//!
//! - [`weather`] – OpenWeather current weather ([`WeatherService`])
//! - [`currency`] – ExchangeRates conversion ([`CurrencyService`]) and the currency-code validator
//! - [`image`] – Giphy random image by tag ([`ImageService`])
//!
//! All clients are stateless apart from their configuration and can be shared across tasks.

pub mod currency;
pub mod error;
pub mod image;
pub mod weather;

use std::time::Duration;

pub use currency::{
    is_valid_currency_code, ConversionRequest, ConversionResult, CurrencyCode, CurrencyService,
    ExchangeRatesClient,
};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use image::{GiphyClient, ImageService};
pub use weather::{Measurement, OpenWeatherClient, WeatherReading, WeatherService};

/// Builds the HTTP client shared by the adapters. `timeout` bounds every request end to end;
/// a request that exceeds it is reported as [`ErrorKind::ServiceUnavailable`].
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}

/// Masks an API key for logging: first 4 chars + "***" + last 2. Keys of 8 chars or fewer become "***".
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key_short_is_fully_masked() {
        assert_eq!(mask_key(""), "***");
        assert_eq!(mask_key("abcdefgh"), "***");
    }

    #[test]
    fn test_mask_key_long_shows_head_and_tail() {
        assert_eq!(mask_key("b5ea7a64dc1c5450"), "b5ea***50");
    }
}

//! ExchangeRates adapter: currency conversion, plus the pure currency-code validator used before
//! any network call.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument, warn};

use crate::error::{ServiceError, ServiceResult};

const EXCHANGERATES_API_BASE: &str = "https://api.apilayer.com";
const CONVERT_PATH: &str = "/exchangerates_data/convert";

/// True for exactly three ASCII letters, in any case.
pub fn is_valid_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Three-letter currency code, normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Accepts `code` if [`is_valid_currency_code`] holds; surrounding whitespace is ignored.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        is_valid_currency_code(code).then(|| Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
}

#[async_trait]
pub trait CurrencyService: Send + Sync {
    /// Converts `request.amount` from one currency to another. A pair the provider cannot
    /// convert is [`ServiceError::InvalidInput`] carrying the provider's message.
    async fn convert(&self, request: &ConversionRequest) -> ServiceResult<ConversionResult>;
}

/// ExchangeRates (apilayer) client. The API key travels in the `apikey` header.
#[derive(Debug, Clone)]
pub struct ExchangeRatesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExchangeRatesClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: EXCHANGERATES_API_BASE.to_string(),
        }
    }

    /// Points the client at another host (tests use a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ConvertPayload {
    #[serde(default)]
    success: bool,
    result: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

#[async_trait]
impl CurrencyService for ExchangeRatesClient {
    #[instrument(skip(self), fields(api_key = %crate::mask_key(&self.api_key)))]
    async fn convert(&self, request: &ConversionRequest) -> ServiceResult<ConversionResult> {
        let url = format!("{}{}", self.base_url, CONVERT_PATH);
        let amount = request.amount.to_string();
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .query(&[
                ("from", request.from.as_str()),
                ("to", request.to.as_str()),
                ("amount", amount.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let result = classify_response(status, &body);

        match &result {
            Ok(r) => info!(status = status.as_u16(), converted = r.converted_amount, "Conversion succeeded"),
            Err(e) => warn!(status = status.as_u16(), error = %e, "Conversion failed"),
        }
        result
    }
}

fn classify_response(status: StatusCode, body: &str) -> ServiceResult<ConversionResult> {
    let malformed = || {
        ServiceError::ServiceUnavailable("Bad or absent JSON data in the response.".to_string())
    };

    match status {
        StatusCode::OK => {
            let payload: ConvertPayload = serde_json::from_str(body).map_err(|_| malformed())?;
            match (payload.success, payload.result) {
                (true, Some(converted_amount)) => Ok(ConversionResult { converted_amount }),
                _ => Err(ServiceError::ServiceUnavailable(
                    "Bad data has been received from the ExchangeRates service.".to_string(),
                )),
            }
        }
        StatusCode::BAD_REQUEST => {
            let envelope: ErrorEnvelope = serde_json::from_str(body).map_err(|_| malformed())?;
            let message = envelope
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "An unknown conversion error has occurred.".to_string());
            Err(ServiceError::InvalidInput(message))
        }
        StatusCode::UNAUTHORIZED => {
            let message = serde_json::from_str::<ErrorEnvelope>(body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "There is no message in the service response.".to_string());
            Err(ServiceError::AccessDenied(message))
        }
        other => Err(ServiceError::ServiceUnavailable(format!(
            "Status code: {}",
            other.as_u16()
        ))),
    }
}

//! OpenWeather adapter: current weather of a locality by name.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument, warn};

use crate::error::{ServiceError, ServiceResult};

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const WEATHER_PATH: &str = "/data/2.5/weather";
const CITY_NOT_FOUND: &str = "city not found";

/// A value with the unit the provider reports it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: &'static str,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Current weather. Units are fixed by the provider contract: Kelvin, hPa, percent.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: Measurement,
    pub pressure: Measurement,
    pub humidity: Measurement,
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Looks up the current weather in `locality`. An unknown locality is [`ServiceError::InvalidInput`].
    async fn current_weather(&self, locality: &str) -> ServiceResult<WeatherReading>;
}

/// OpenWeather client. Holds the API key; safe to share between tasks.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: OPENWEATHER_API_BASE.to_string(),
        }
    }

    /// Points the client at another host (tests use a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    main: MainPayload,
}

#[derive(Debug, Deserialize)]
struct MainPayload {
    temp: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    #[instrument(skip(self), fields(api_key = %crate::mask_key(&self.api_key)))]
    async fn current_weather(&self, locality: &str) -> ServiceResult<WeatherReading> {
        let url = format!("{}{}", self.base_url, WEATHER_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("q", locality), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let result = classify_response(status, &body, locality);

        match &result {
            Ok(_) => info!(status = status.as_u16(), "OpenWeather lookup succeeded"),
            Err(e) => warn!(status = status.as_u16(), error = %e, "OpenWeather lookup failed"),
        }
        result
    }
}

/// Maps a raw OpenWeather response to the reading or a classified error.
fn classify_response(status: StatusCode, body: &str, locality: &str) -> ServiceResult<WeatherReading> {
    match status {
        StatusCode::OK => {
            let payload: WeatherPayload = serde_json::from_str(body).map_err(|_| {
                ServiceError::ServiceUnavailable(
                    "Bad data has been received from the OpenWeather service.".to_string(),
                )
            })?;
            Ok(WeatherReading {
                temperature: Measurement {
                    value: payload.main.temp,
                    unit: "K",
                },
                pressure: Measurement {
                    value: payload.main.pressure,
                    unit: "hPa",
                },
                humidity: Measurement {
                    value: payload.main.humidity,
                    unit: "%",
                },
            })
        }
        StatusCode::NOT_FOUND => {
            let payload: ErrorPayload = serde_json::from_str(body).map_err(|_| {
                ServiceError::ServiceUnavailable(
                    "The OpenWeather service has returned code 404.".to_string(),
                )
            })?;
            if payload.message == CITY_NOT_FOUND {
                Err(ServiceError::InvalidInput(format!(
                    "Locality with name \"{}\" has not been found.",
                    locality
                )))
            } else {
                Err(ServiceError::ServiceUnavailable(format!(
                    "The OpenWeather service has returned code 404: {}",
                    payload.message
                )))
            }
        }
        StatusCode::UNAUTHORIZED => Err(ServiceError::AccessDenied(
            "Access to the OpenWeather service is denied with the given API key.".to_string(),
        )),
        other => Err(ServiceError::ServiceUnavailable(format!(
            "The OpenWeather service has returned code {}",
            other.as_u16()
        ))),
    }
}

//! Giphy adapter: a random image for a tag, in two calls (metadata lookup, then binary fetch).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::{ServiceError, ServiceResult};

const GIPHY_API_BASE: &str = "https://api.giphy.com";
const RANDOM_PATH: &str = "/v1/gifs/random";

#[async_trait]
pub trait ImageService: Send + Sync {
    /// Returns the raw bytes of a random image tagged `tag`.
    async fn random_image(&self, tag: &str) -> ServiceResult<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct GiphyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GiphyClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: GIPHY_API_BASE.to_string(),
        }
    }

    /// Points the metadata lookup at another host (tests use a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn image_url(&self, tag: &str) -> ServiceResult<String> {
        let url = format!("{}{}", self.base_url, RANDOM_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("tag", tag), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        classify_metadata(status, &body)
    }

    async fn download(&self, url: &str) -> ServiceResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ServiceError::ServiceUnavailable(format!(
                "Image download has returned code {}",
                status.as_u16()
            )));
        }
        let bytes = response.bytes().await.map_err(|_| {
            ServiceError::ServiceUnavailable("Bad image data has been received.".to_string())
        })?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct RandomPayload {
    data: RandomData,
}

#[derive(Debug, Deserialize)]
struct RandomData {
    images: Images,
}

#[derive(Debug, Deserialize)]
struct Images {
    downsized_large: ImageRef,
}

#[derive(Debug, Deserialize)]
struct ImageRef {
    url: String,
}

#[derive(Debug, Deserialize)]
struct MetaEnvelope {
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct Meta {
    msg: String,
}

#[async_trait]
impl ImageService for GiphyClient {
    #[instrument(skip(self), fields(api_key = %crate::mask_key(&self.api_key)))]
    async fn random_image(&self, tag: &str) -> ServiceResult<Vec<u8>> {
        let result = match self.image_url(tag).await {
            Ok(url) => self.download(&url).await,
            Err(e) => Err(e),
        };
        match &result {
            Ok(bytes) => info!(size = bytes.len(), "Giphy image fetched"),
            Err(e) => warn!(error = %e, "Giphy image fetch failed"),
        }
        result
    }
}

/// Maps the metadata response to the image location or a classified error.
fn classify_metadata(status: StatusCode, body: &str) -> ServiceResult<String> {
    match status {
        StatusCode::OK => serde_json::from_str::<RandomPayload>(body)
            .map(|p| p.data.images.downsized_large.url)
            .map_err(|_| {
                ServiceError::ServiceUnavailable(
                    "Bad data has been received from the Giphy service.".to_string(),
                )
            }),
        StatusCode::UNAUTHORIZED => {
            let message = serde_json::from_str::<MetaEnvelope>(body)
                .map(|e| e.meta.msg)
                .unwrap_or_else(|_| "There is no message in the service response.".to_string());
            Err(ServiceError::AccessDenied(message))
        }
        other => Err(ServiceError::ServiceUnavailable(format!(
            "The Giphy service has returned code {}",
            other.as_u16()
        ))),
    }
}

//! Content-addressed metadata storage through a pinning service.
//!
//! Certificate PDFs and JSON metadata are pinned before minting; the
//! returned gateway URI goes into the asset's metadata field. Each store is
//! one HTTP round trip; a non-success status surfaces as
//! `StoreUnavailable` with the response body as diagnostic text.

use std::time::Duration;

use reqwest::multipart;
use serde::Deserialize;
use serde::Serialize;

use crate::config::PinningConfig;
use crate::error::{Error, Result};

const FILE_PIN_PATH: &str = "/pinning/pinFileToIPFS";
const JSON_PIN_PATH: &str = "/pinning/pinJSONToIPFS";

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for the Pinata pinning API.
#[derive(Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    base_url: String,
    gateway: String,
    api_key: String,
    api_secret: String,
}

impl PinataClient {
    pub fn new(config: &PinningConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(Error::Config(
                "pinning credentials not set (PINATA_API_KEY / PINATA_API_SECRET)".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            gateway: config.gateway.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    /// Pin raw file bytes (e.g. a certificate PDF). Returns the gateway
    /// retrieval URI for the pinned content.
    pub async fn store_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, FILE_PIN_PATH))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.api_secret)
            .multipart(form)
            .send()
            .await?;

        self.finish(response).await
    }

    /// Pin structured JSON metadata.
    pub async fn store_json<T: Serialize>(&self, metadata: &T) -> Result<String> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, JSON_PIN_PATH))
            .header("pinata_api_key", &self.api_key)
            .header("pinata_secret_api_key", &self.api_secret)
            .json(metadata)
            .send()
            .await?;

        self.finish(response).await
    }

    async fn finish(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Pinning request failed");
            return Err(Error::StoreUnavailable(format!("{}: {}", status, body)));
        }

        let parsed: PinResponse =
            serde_json::from_str(&body).map_err(|e| Error::Encoding(e.to_string()))?;
        let uri = format!("{}/ipfs/{}", self.gateway, parsed.ipfs_hash);

        tracing::info!(uri = %uri, "Content pinned");
        Ok(uri)
    }
}

impl std::fmt::Debug for PinataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataClient")
            .field("base_url", &self.base_url)
            .field("gateway", &self.gateway)
            .finish()
    }
}

//! REST client for the indexer's v2 API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::crypto::Address;
use crate::error::{Error, Result};
use crate::indexer::models::{AccountAssetsResponse, AssetResponse};
use crate::indexer::{AssetHolding, AssetParams, IndexClient};

/// Client handle for a single indexer endpoint. Stateless and cheap to
/// clone.
#[derive(Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IndexerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| Error::Config(format!("invalid indexer URL '{}': {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        tracing::info!(url = %base_url, "Indexer client initialized");
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint path '{}': {}", path, e)))
    }
}

#[async_trait]
impl IndexClient for IndexerClient {
    async fn account_assets(&self, address: &Address) -> Result<Vec<AssetHolding>> {
        let path = format!("/v2/accounts/{}/assets", address);
        let response = self.http.get(self.endpoint(&path)?).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Transport(format!("{} returned {}: {}", path, status, body)));
        }

        let parsed: AccountAssetsResponse =
            serde_json::from_str(&body).map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(parsed.assets)
    }

    async fn asset_info(&self, asset_id: u64) -> Result<AssetParams> {
        let path = format!("/v2/assets/{}", asset_id);
        let response = self.http.get(self.endpoint(&path)?).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(asset_id));
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Transport(format!("{} returned {}: {}", path, status, body)));
        }

        let parsed: AssetResponse =
            serde_json::from_str(&body).map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(parsed.asset.params)
    }
}

impl std::fmt::Debug for IndexerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexerClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let result = IndexerClient::new("::nope::", Duration::from_secs(5));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

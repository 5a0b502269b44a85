//! REST client for the node's v2 API.
//!
//! # Responsibilities
//! - Fetch suggested transaction parameters
//! - Submit signed intents and read back pool/confirmation state
//! - Map registry rejections and transport failures onto distinct errors
//!
//! Every request carries the client's timeout; there is no retry here.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::algod::models::{
    NodeStatus, PendingTransaction, SubmitResponse, SuggestedParams, TransactionParamsResponse,
};
use crate::algod::NodeClient;
use crate::error::{Error, Result};
use crate::transactions::SignedTransaction;

/// Rounds an intent stays valid for after construction.
const VALIDITY_WINDOW: u64 = 1000;

/// API token header understood by node deployments that require auth.
const TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Client handle for a single node endpoint. Cheap to clone and safe to
/// share; holds no per-call state.
#[derive(Clone)]
pub struct AlgodClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AlgodClient {
    /// Create a client for `base_url`, sending `token` when non-empty.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| Error::Config(format!("invalid node URL '{}': {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        if !token.is_empty() {
            let value = HeaderValue::from_str(token)
                .map_err(|_| Error::Config("node API token is not a valid header value".to_string()))?;
            headers.insert(TOKEN_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        tracing::info!(url = %base_url, "Node client initialized");
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint path '{}': {}", path, e)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.endpoint(path)?).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Transport(format!("{} returned {}: {}", path, status, body)));
        }

        serde_json::from_str(&body).map_err(|e| Error::Encoding(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl NodeClient for AlgodClient {
    async fn suggested_params(&self) -> Result<SuggestedParams> {
        let raw: TransactionParamsResponse = self.get_json("/v2/transactions/params").await?;

        let hash_bytes = BASE64
            .decode(&raw.genesis_hash)
            .map_err(|e| Error::Encoding(format!("genesis hash: {}", e)))?;
        let genesis_hash: [u8; 32] = hash_bytes
            .try_into()
            .map_err(|_| Error::Encoding("genesis hash is not 32 bytes".to_string()))?;

        Ok(SuggestedParams {
            genesis_id: raw.genesis_id,
            genesis_hash,
            first_valid: raw.last_round,
            last_valid: raw.last_round + VALIDITY_WINDOW,
            fee: raw.min_fee,
            min_fee: raw.min_fee,
        })
    }

    async fn submit(&self, signed: &SignedTransaction) -> Result<String> {
        let body = signed.to_bytes()?;
        let response = self
            .http
            .post(self.endpoint("/v2/transactions")?)
            .header(CONTENT_TYPE, "application/x-binary")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Submission rejected by node");
            return Err(Error::SubmissionRejected(text));
        }

        let parsed: SubmitResponse =
            serde_json::from_str(&text).map_err(|e| Error::Encoding(e.to_string()))?;
        tracing::debug!(txid = %parsed.tx_id, "Transaction submitted");
        Ok(parsed.tx_id)
    }

    async fn pending_transaction(&self, txid: &str) -> Result<PendingTransaction> {
        self.get_json(&format!("/v2/transactions/pending/{}", txid))
            .await
    }

    async fn last_round(&self) -> Result<u64> {
        let status: NodeStatus = self.get_json("/v2/status").await?;
        Ok(status.last_round)
    }
}

impl std::fmt::Debug for AlgodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgodClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let result = AlgodClient::new("not a url", "", Duration::from_secs(5));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_omits_token() {
        let client =
            AlgodClient::new("https://testnet-api.algonode.cloud", "secret-token", Duration::from_secs(5))
                .unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("secret-token"));
    }
}

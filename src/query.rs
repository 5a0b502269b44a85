//! Read-only lookups of credentials through the registry's index.

use std::sync::Arc;

use crate::crypto::Address;
use crate::error::Result;
use crate::indexer::{AssetHolding, AssetParams, IndexClient};

/// Answers "what does this wallet hold" and "what is this credential"
/// against an injected index handle.
#[derive(Clone)]
pub struct QueryService {
    index: Arc<dyn IndexClient>,
}

impl QueryService {
    pub fn new(index: Arc<dyn IndexClient>) -> Self {
        Self { index }
    }

    /// All credentials actually owned by `address`: holdings with amount
    /// strictly greater than zero. An address that has only opted in does
    /// not appear. Order is whatever the index returned; it is not part of
    /// the contract.
    pub async fn list_credentials(&self, address: &Address) -> Result<Vec<AssetHolding>> {
        let holdings = self.index.account_assets(address).await?;
        let owned: Vec<AssetHolding> = holdings.into_iter().filter(|h| h.amount > 0).collect();

        tracing::debug!(address = %address, count = owned.len(), "Listed credentials");
        Ok(owned)
    }

    /// Immutable creation parameters of a single credential.
    pub async fn get_credential_info(&self, asset_id: u64) -> Result<AssetParams> {
        self.index.asset_info(asset_id).await
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService").finish()
    }
}

//! Read-optimized index integration.
//!
//! The indexer answers historical/aggregate queries against registry state
//! without a write-capable node. `IndexClient` is the seam: production code
//! uses `IndexerClient`, tests substitute a double backed by the same
//! in-memory ledger as the node double.

pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::crypto::Address;
use crate::error::Result;

pub use client::IndexerClient;
pub use models::{AssetHolding, AssetParams};

/// Query endpoint of the registry's index.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Every asset associated with `address`, including zero-amount
    /// opt-ins, in whatever order the index provides.
    async fn account_assets(&self, address: &Address) -> Result<Vec<AssetHolding>>;

    /// Immutable creation parameters of a single asset. `NotFound` when the
    /// id is unknown to the index.
    async fn asset_info(&self, asset_id: u64) -> Result<AssetParams>;
}

//! Asset registry (node) integration.
//!
//! # Data Flow
//! ```text
//! suggested params → signed intent → submit → poll pending / rounds
//! ```
//!
//! The `NodeClient` trait is the seam between the issuance service and the
//! network: production code talks to a node's REST API through
//! `AlgodClient`, tests substitute an in-memory double. Handles are
//! stateless and safely reusable across calls.

pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::error::Result;
use crate::transactions::SignedTransaction;

pub use client::AlgodClient;
pub use models::{NodeStatus, PendingTransaction, SuggestedParams};

/// Submission and confirmation endpoint of the asset registry.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Current network parameters for building an intent.
    async fn suggested_params(&self) -> Result<SuggestedParams>;

    /// Submit a signed intent. Returns the transaction id on acceptance
    /// into the pool; a rejection surfaces as `SubmissionRejected`.
    async fn submit(&self, signed: &SignedTransaction) -> Result<String>;

    /// Look up a submitted transaction's pending/confirmed state.
    async fn pending_transaction(&self, txid: &str) -> Result<PendingTransaction>;

    /// The latest finalized round.
    async fn last_round(&self) -> Result<u64>;
}

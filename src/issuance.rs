//! Credential issuance: mint, opt-in, transfer.
//!
//! Turns an institution's intent to certify a student into an on-chain,
//! uniquely owned token, respecting the registry's two-phase
//! opt-in-then-transfer constraint. Each operation is a single blocking
//! sequence: build → sign → submit → poll until confirmed or the round
//! bound passes. Nothing is retried; an ambiguous `ConfirmationTimeout`
//! means the caller must re-query before trying again.

use std::sync::Arc;
use std::time::Duration;

use crate::algod::{NodeClient, PendingTransaction};
use crate::crypto::{Account, Address};
use crate::error::{Error, Result};
use crate::transactions::Transaction;

/// How long to wait for a submitted intent to finalize.
///
/// Expressed as an explicit policy rather than a hard-coded constant so
/// callers can tune for network conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Rounds past submission to keep polling before giving up.
    pub max_rounds: u64,
    /// Pause between polls of the pending-transaction endpoint.
    pub poll_interval: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            max_rounds: 4,
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Issues credential assets through an injected registry handle.
///
/// Holds no state of record; private keys are borrowed per call and never
/// stored. Safe to share across tasks.
#[derive(Clone)]
pub struct IssuanceService {
    node: Arc<dyn NodeClient>,
    policy: ConfirmationPolicy,
}

impl IssuanceService {
    pub fn new(node: Arc<dyn NodeClient>) -> Self {
        Self::with_policy(node, ConfirmationPolicy::default())
    }

    pub fn with_policy(node: Arc<dyn NodeClient>, policy: ConfirmationPolicy) -> Self {
        Self { node, policy }
    }

    /// Mint a credential asset: exactly one unit, zero decimals, all
    /// authority roles held by the institution. Returns the asset id
    /// assigned by the registry at confirmation.
    ///
    /// Not idempotent: two identical calls create two distinct assets. No
    /// local validation of the name or URI is performed.
    pub async fn mint_credential(
        &self,
        institution: &Account,
        certificate_name: &str,
        metadata_url: &str,
    ) -> Result<u64> {
        let params = self.node.suggested_params().await?;
        let txn =
            Transaction::asset_create(institution.address(), &params, certificate_name, metadata_url);

        let txid = self.node.submit(&txn.sign(institution)?).await?;
        let confirmed = self.wait_for_confirmation(&txid).await?;

        let asset_id = confirmed.asset_index.ok_or_else(|| {
            Error::SubmissionRejected("confirmation record carries no asset id".to_string())
        })?;

        tracing::info!(
            asset_id = asset_id,
            institution = %institution.address(),
            name = certificate_name,
            "Credential minted"
        );
        Ok(asset_id)
    }

    /// Register the student's willingness to hold `asset_id` (a zero-amount
    /// self-transfer). Must confirm strictly before any transfer to the
    /// student is attempted. A duplicate opt-in is not rejected here; if
    /// the registry declines it, that surfaces as `SubmissionRejected`.
    pub async fn opt_in(&self, student: &Account, asset_id: u64) -> Result<String> {
        let params = self.node.suggested_params().await?;
        let txn = Transaction::asset_opt_in(student.address(), &params, asset_id);

        let txid = self.node.submit(&txn.sign(student)?).await?;
        self.wait_for_confirmation(&txid).await?;

        tracing::info!(asset_id = asset_id, student = %student.address(), "Opt-in confirmed");
        Ok(txid)
    }

    /// Move the single unit of `asset_id` from the institution to the
    /// student. The opt-in precondition is not checked locally; the
    /// registry rejects transfers to addresses that have not opted in.
    pub async fn transfer_credential(
        &self,
        institution: &Account,
        student_address: Address,
        asset_id: u64,
    ) -> Result<String> {
        let params = self.node.suggested_params().await?;
        let txn =
            Transaction::asset_transfer(institution.address(), &params, student_address, asset_id, 1);

        let txid = self.node.submit(&txn.sign(institution)?).await?;
        self.wait_for_confirmation(&txid).await?;

        tracing::info!(
            asset_id = asset_id,
            student = %student_address,
            "Credential transferred"
        );
        Ok(txid)
    }

    /// Poll until the transaction is included in a finalized block, the
    /// pool reports an error, or `max_rounds` rounds pass.
    pub async fn wait_for_confirmation(&self, txid: &str) -> Result<PendingTransaction> {
        let start = self.node.last_round().await?;
        let deadline = start + self.policy.max_rounds;

        loop {
            let pending = self.node.pending_transaction(txid).await?;

            if !pending.pool_error.is_empty() {
                return Err(Error::SubmissionRejected(pending.pool_error));
            }
            if pending.is_confirmed() {
                tracing::debug!(txid = %txid, round = ?pending.confirmed_round, "Confirmed");
                return Ok(pending);
            }

            let current = self.node.last_round().await?;
            if current >= deadline {
                return Err(Error::ConfirmationTimeout {
                    rounds: self.policy.max_rounds,
                });
            }

            tracing::debug!(txid = %txid, round = current, "Waiting for confirmation");
            tokio::time::sleep(self.policy.poll_interval).await;
        }
    }
}

impl std::fmt::Debug for IssuanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuanceService")
            .field("policy", &self.policy)
            .finish()
    }
}

//! Typed models for the node's REST responses.
//!
//! Responses are explicit structs rather than loose JSON maps; optional
//! fields are `Option`, absent numeric fields are never conflated with zero
//! (the one exception is `PendingTransaction::confirmed_round`, where the
//! node itself uses 0/absent for "not yet included").

use serde::Deserialize;

/// Network parameters current at build time, applied to every intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    /// First round the intent is valid in (the node's last seen round).
    pub first_valid: u64,
    /// Last round the intent is valid in.
    pub last_valid: u64,
    /// Flat fee in microunits.
    pub fee: u64,
    pub min_fee: u64,
}

/// Raw JSON shape of `GET /v2/transactions/params`.
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionParamsResponse {
    #[serde(rename = "genesis-id")]
    pub genesis_id: String,
    #[serde(rename = "genesis-hash")]
    pub genesis_hash: String,
    #[serde(rename = "last-round")]
    pub last_round: u64,
    #[serde(rename = "min-fee")]
    pub min_fee: u64,
}

/// State of a submitted transaction, from
/// `GET /v2/transactions/pending/{txid}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingTransaction {
    /// Round the transaction was included in; `None` or `Some(0)` while
    /// still pending.
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: Option<u64>,

    /// Asset id assigned by a confirmed create-asset transaction.
    #[serde(rename = "asset-index", default)]
    pub asset_index: Option<u64>,

    /// Non-empty when the pool rejected the transaction.
    #[serde(rename = "pool-error", default)]
    pub pool_error: String,
}

impl PendingTransaction {
    /// Whether the transaction has been included in a finalized block.
    pub fn is_confirmed(&self) -> bool {
        matches!(self.confirmed_round, Some(r) if r > 0)
    }
}

/// Node status from `GET /v2/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeStatus {
    #[serde(rename = "last-round")]
    pub last_round: u64,
}

/// Response body of a successful submission.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transaction_confirmation() {
        let pending = PendingTransaction::default();
        assert!(!pending.is_confirmed());

        let pending = PendingTransaction {
            confirmed_round: Some(0),
            ..Default::default()
        };
        assert!(!pending.is_confirmed());

        let pending = PendingTransaction {
            confirmed_round: Some(1205),
            asset_index: Some(42),
            pool_error: String::new(),
        };
        assert!(pending.is_confirmed());
    }

    #[test]
    fn test_pending_transaction_deserializes() {
        let pending: PendingTransaction = serde_json::from_str(
            r#"{"confirmed-round": 7, "asset-index": 99, "pool-error": ""}"#,
        )
        .unwrap();
        assert_eq!(pending.confirmed_round, Some(7));
        assert_eq!(pending.asset_index, Some(99));
        assert!(pending.pool_error.is_empty());
    }

    #[test]
    fn test_status_deserializes() {
        let status: NodeStatus = serde_json::from_str(r#"{"last-round": 555}"#).unwrap();
        assert_eq!(status.last_round, 555);
    }
}

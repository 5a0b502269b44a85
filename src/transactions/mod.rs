//! Transaction intents: build, sign, encode.
//!
//! # Data Flow
//! ```text
//! algod suggested params
//!     → builders (asset_create / asset_opt_in / asset_transfer)
//!     → Account signing ("TX" domain prefix)
//!     → encode.rs (canonical msgpack) → submission
//! ```
//!
//! An intent is ephemeral: constructed with current network parameters,
//! signed, submitted, then polled until confirmed or a round bound passes.
//! Nothing here persists state.

pub mod encode;

use crate::algod::models::SuggestedParams;
use crate::crypto::{Account, Address};
use crate::error::Result;

/// Fixed unit name stamped on every credential asset.
pub const CREDENTIAL_UNIT_NAME: &str = "CERT";

/// An unsigned transaction intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    pub note: Vec<u8>,
    pub body: TransactionType,
}

/// The type-specific payload of an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    /// Create a new asset (`acfg` with no asset id).
    AssetConfig(AssetConfigBody),
    /// Move units of an existing asset (`axfer`); a zero-amount
    /// self-transfer is the registry's opt-in.
    AssetTransfer(AssetTransferBody),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfigBody {
    pub total: u64,
    pub decimals: u32,
    pub default_frozen: bool,
    pub unit_name: String,
    pub asset_name: String,
    pub url: String,
    pub manager: Option<Address>,
    pub reserve: Option<Address>,
    pub freeze: Option<Address>,
    pub clawback: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransferBody {
    pub asset_id: u64,
    pub amount: u64,
    pub receiver: Address,
}

impl Transaction {
    fn header(sender: Address, params: &SuggestedParams, body: TransactionType) -> Self {
        Self {
            sender,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            note: Vec::new(),
            body,
        }
    }

    /// Create-asset intent for a credential: exactly one indivisible unit,
    /// with all four authority roles held by the creator.
    pub fn asset_create(
        sender: Address,
        params: &SuggestedParams,
        asset_name: &str,
        url: &str,
    ) -> Self {
        Self::header(
            sender,
            params,
            TransactionType::AssetConfig(AssetConfigBody {
                total: 1,
                decimals: 0,
                default_frozen: false,
                unit_name: CREDENTIAL_UNIT_NAME.to_string(),
                asset_name: asset_name.to_string(),
                url: url.to_string(),
                manager: Some(sender),
                reserve: Some(sender),
                freeze: Some(sender),
                clawback: Some(sender),
            }),
        )
    }

    /// Transfer intent moving `amount` units of `asset_id` to `receiver`.
    pub fn asset_transfer(
        sender: Address,
        params: &SuggestedParams,
        receiver: Address,
        asset_id: u64,
        amount: u64,
    ) -> Self {
        Self::header(
            sender,
            params,
            TransactionType::AssetTransfer(AssetTransferBody {
                asset_id,
                amount,
                receiver,
            }),
        )
    }

    /// Opt-in intent: the registry-mandated zero-amount self-transfer that
    /// must confirm before any positive transfer to this address succeeds.
    pub fn asset_opt_in(sender: Address, params: &SuggestedParams, asset_id: u64) -> Self {
        Self::asset_transfer(sender, params, sender, asset_id, 0)
    }

    /// The transaction id: base32 of SHA-512/256 over the domain-prefixed
    /// canonical encoding.
    pub fn id(&self) -> Result<String> {
        encode::transaction_id(self)
    }

    /// Sign the intent with `account`'s key.
    pub fn sign(&self, account: &Account) -> Result<SignedTransaction> {
        let sig = account.sign_bytes(&encode::signing_bytes(self)?);
        Ok(SignedTransaction {
            txn: self.clone(),
            sig,
        })
    }
}

/// A signed intent ready for submission.
///
/// Keeps the structured transaction alongside the signature so client
/// implementations (and test doubles) can inspect the intent without
/// re-decoding wire bytes.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub txn: Transaction,
    pub sig: [u8; 64],
}

impl SignedTransaction {
    /// The id of the wrapped transaction.
    pub fn id(&self) -> Result<String> {
        self.txn.id()
    }

    /// Canonical wire bytes for submission.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode::signed_transaction_bytes(self)
    }
}

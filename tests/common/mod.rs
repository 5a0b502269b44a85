//! Shared in-memory registry/index double for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use algocred::algod::{NodeClient, PendingTransaction, SuggestedParams};
use algocred::indexer::{AssetHolding, AssetParams, IndexClient};
use algocred::transactions::{SignedTransaction, TransactionType};
use algocred::{Address, Error, Result};

#[derive(Default)]
struct LedgerState {
    round: u64,
    next_asset_id: u64,
    assets: HashMap<u64, AssetParams>,
    /// (address, asset id) → held amount. Presence with amount 0 means
    /// opted in but not yet received.
    holdings: HashMap<(String, u64), u64>,
    pending: HashMap<String, PendingTransaction>,
    finalize: bool,
    reject_duplicate_opt_in: bool,
}

/// Programmable registry + index double. Implements both client traits
/// over one shared state so issuance effects are visible to queries.
#[derive(Clone)]
pub struct FakeLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                round: 1,
                next_asset_id: 1,
                finalize: true,
                ..Default::default()
            })),
        }
    }

    /// A registry that accepts submissions but never includes them in a
    /// block, for exercising the confirmation timeout path.
    #[allow(dead_code)]
    pub fn never_finalizing() -> Self {
        let ledger = Self::new();
        ledger.state.lock().unwrap().finalize = false;
        ledger
    }

    /// Make the registry reject repeated opt-ins instead of accepting
    /// them as no-ops.
    #[allow(dead_code)]
    pub fn reject_duplicate_opt_ins(&self) {
        self.state.lock().unwrap().reject_duplicate_opt_in = true;
    }

    /// Direct view of a holding, bypassing the index.
    #[allow(dead_code)]
    pub fn holding(&self, address: &Address, asset_id: u64) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .holdings
            .get(&(address.to_string(), asset_id))
            .copied()
    }

    fn apply(&self, signed: &SignedTransaction, txid: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.round += 1;
        let confirmed_round = state.round;

        if !state.finalize {
            state
                .pending
                .insert(txid.to_string(), PendingTransaction::default());
            return Ok(());
        }

        let sender = signed.txn.sender.to_string();
        let mut asset_index = None;

        match &signed.txn.body {
            TransactionType::AssetConfig(body) => {
                let asset_id = state.next_asset_id;
                state.next_asset_id += 1;

                state.assets.insert(
                    asset_id,
                    AssetParams {
                        name: Some(body.asset_name.clone()).filter(|s| !s.is_empty()),
                        unit_name: Some(body.unit_name.clone()).filter(|s| !s.is_empty()),
                        url: Some(body.url.clone()).filter(|s| !s.is_empty()),
                        total: body.total,
                        decimals: body.decimals,
                        creator: sender.clone(),
                        manager: body.manager.map(|a| a.to_string()),
                        reserve: body.reserve.map(|a| a.to_string()),
                        freeze: body.freeze.map(|a| a.to_string()),
                        clawback: body.clawback.map(|a| a.to_string()),
                    },
                );
                state.holdings.insert((sender, asset_id), body.total);
                asset_index = Some(asset_id);
            }
            TransactionType::AssetTransfer(body) => {
                if !state.assets.contains_key(&body.asset_id) {
                    return Err(Error::SubmissionRejected(format!(
                        "asset {} does not exist",
                        body.asset_id
                    )));
                }

                let receiver = body.receiver.to_string();
                if body.amount == 0 && receiver == sender {
                    // Opt-in.
                    let key = (sender, body.asset_id);
                    if state.holdings.contains_key(&key) {
                        if state.reject_duplicate_opt_in {
                            return Err(Error::SubmissionRejected(
                                "account has already opted in".to_string(),
                            ));
                        }
                    } else {
                        state.holdings.insert(key, 0);
                    }
                } else {
                    if !state
                        .holdings
                        .contains_key(&(receiver.clone(), body.asset_id))
                    {
                        return Err(Error::SubmissionRejected(format!(
                            "receiver has not opted in to asset {}",
                            body.asset_id
                        )));
                    }

                    let sender_key = (sender, body.asset_id);
                    let balance = state.holdings.get(&sender_key).copied().unwrap_or(0);
                    if balance < body.amount {
                        return Err(Error::SubmissionRejected(
                            "sender holds insufficient units".to_string(),
                        ));
                    }

                    *state.holdings.get_mut(&sender_key).unwrap() -= body.amount;
                    *state
                        .holdings
                        .get_mut(&(receiver, body.asset_id))
                        .unwrap() += body.amount;
                }
            }
        }

        state.pending.insert(
            txid.to_string(),
            PendingTransaction {
                confirmed_round: Some(confirmed_round),
                asset_index,
                pool_error: String::new(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl NodeClient for FakeLedger {
    async fn suggested_params(&self) -> Result<SuggestedParams> {
        let round = self.state.lock().unwrap().round;
        Ok(SuggestedParams {
            genesis_id: "fakenet-v1".to_string(),
            genesis_hash: [7u8; 32],
            first_valid: round,
            last_valid: round + 1000,
            fee: 1000,
            min_fee: 1000,
        })
    }

    async fn submit(&self, signed: &SignedTransaction) -> Result<String> {
        let txid = signed.id()?;
        self.apply(signed, &txid)?;
        Ok(txid)
    }

    async fn pending_transaction(&self, txid: &str) -> Result<PendingTransaction> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .pending
            .get(txid)
            .cloned()
            .unwrap_or_default())
    }

    async fn last_round(&self) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.round += 1;
        Ok(state.round)
    }
}

#[async_trait]
impl IndexClient for FakeLedger {
    async fn account_assets(&self, address: &Address) -> Result<Vec<AssetHolding>> {
        let state = self.state.lock().unwrap();
        let wanted = address.to_string();

        let mut holdings: Vec<AssetHolding> = state
            .holdings
            .iter()
            .filter(|((addr, _), _)| *addr == wanted)
            .map(|((_, asset_id), amount)| AssetHolding {
                asset_id: *asset_id,
                amount: *amount,
                is_frozen: false,
            })
            .collect();
        holdings.sort_by_key(|h| h.asset_id);
        Ok(holdings)
    }

    async fn asset_info(&self, asset_id: u64) -> Result<AssetParams> {
        self.state
            .lock()
            .unwrap()
            .assets
            .get(&asset_id)
            .cloned()
            .ok_or(Error::NotFound(asset_id))
    }
}

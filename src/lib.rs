//! Credential issuance on the Algorand blockchain.
//!
//! Mints one-unit assets representing academic credentials, walks the
//! registry's opt-in-then-transfer sequence, and answers wallet/credential
//! lookups through the indexer. Around the core sit a Pinata pinning
//! wrapper, a BIP39 derivation utility for institution keys, and an
//! env-driven configuration layer.

pub mod algod;
pub mod config;
pub mod crypto;
pub mod error;
pub mod indexer;
pub mod issuance;
pub mod pinning;
pub mod query;
pub mod transactions;
pub mod verifier;

pub use config::Config;
pub use crypto::{Account, Address};
pub use error::{Error, Result};
pub use issuance::{ConfirmationPolicy, IssuanceService};
pub use pinning::PinataClient;
pub use query::QueryService;
pub use verifier::CredentialVerifier;

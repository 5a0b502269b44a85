//! Key material and identity handling.
//!
//! # Data Flow
//! ```text
//! BIP39 recovery phrase
//!     → hd.rs (seed + hardened ed25519 derivation)
//!     → account.rs (signing identity)
//!     → address.rs (public identity as rendered on the network)
//! mnemonic.rs handles the network's own 25-word key encoding.
//! ```
//!
//! # Security Constraints
//! - Private keys only ever come from mnemonics, seeds, or the OS RNG
//! - Never log or serialize key material; log addresses instead

pub mod account;
pub mod address;
pub mod hd;
pub mod mnemonic;

pub use account::Account;
pub use address::Address;

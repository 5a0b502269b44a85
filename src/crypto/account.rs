//! Signing identities (institution and student wallets).
//!
//! # Security
//! - Key material comes only from mnemonics, raw seeds, or the OS RNG
//! - `Account` never implements `Serialize`; `Debug` prints the address only

use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;

use crate::crypto::address::Address;
use crate::crypto::mnemonic;
use crate::error::Result;

/// An ed25519 signing identity with its derived network address.
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
}

impl Account {
    /// Build an account from a raw 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Build an account from a 25-word recovery phrase.
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let seed = mnemonic::to_key(phrase)?;
        Ok(Self::from_seed(seed))
    }

    /// Generate a fresh account from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// The account's public address.
    pub fn address(&self) -> Address {
        Address::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Export the account as a 25-word recovery phrase.
    pub fn mnemonic(&self) -> String {
        mnemonic::from_key(&self.signing_key.to_bytes())
    }

    /// Sign raw bytes. Callers are responsible for applying the correct
    /// domain prefix (e.g. `"TX"` for transactions) before signing.
    pub fn sign_bytes(&self, bytes: &[u8]) -> [u8; 64] {
        self.signing_key.sign(bytes).to_bytes()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .finish()
    }
}

//! BIP39 recovery-phrase derivation of network signing keys.
//!
//! A 12- or 24-word BIP39 phrase is stretched to a seed and walked down the
//! hardened SLIP-0010 ed25519 path `m/44'/283'/{account}'/0'/0'` (283 is the
//! network's registered coin type). Same inputs always yield the same key;
//! there are no network calls.

use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::crypto::account::Account;
use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

const COIN_TYPE: u32 = 283;
const HARDENED: u32 = 0x8000_0000;

struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

fn master_key(seed: &[u8]) -> ExtendedKey {
    let digest = hmac_sha512(b"ed25519 seed", seed);
    split(digest)
}

fn derive_child(parent: &ExtendedKey, index: u32) -> ExtendedKey {
    // SLIP-0010 ed25519 admits hardened children only.
    let hardened_index = index | HARDENED;
    let mut data = Vec::with_capacity(37);
    data.push(0u8);
    data.extend_from_slice(&parent.key);
    data.extend_from_slice(&hardened_index.to_be_bytes());

    split(hmac_sha512(&parent.chain_code, &data))
}

fn split(digest: [u8; 64]) -> ExtendedKey {
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    ExtendedKey { key, chain_code }
}

/// Derive the signing identity for `account_index` from a BIP39 phrase.
pub fn derive_account(bip39_phrase: &str, account_index: u32) -> Result<Account> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, bip39_phrase)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;
    let seed = mnemonic.to_seed("");

    let mut node = master_key(&seed);
    for index in [44, COIN_TYPE, account_index, 0, 0] {
        node = derive_child(&node, index);
    }

    Ok(Account::from_seed(node.key))
}

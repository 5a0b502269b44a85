//! Canonical wire encoding of transaction intents.
//!
//! The registry requires canonical msgpack: map keys in lexicographic order
//! and zero-valued fields omitted entirely. The wire structs below declare
//! their fields alphabetically and skip empty values, so serializing them as
//! named maps yields the canonical form byte for byte.

use data_encoding::BASE32_NOPAD;
use serde::Serialize;
use serde_bytes::ByteBuf;
use sha2::{Digest, Sha512_256};

use crate::error::{Error, Result};
use crate::transactions::{SignedTransaction, Transaction, TransactionType};

/// Domain prefix mixed into both the signature and the transaction id.
const TX_PREFIX: &[u8] = b"TX";

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !v
}

fn is_empty_str(v: &str) -> bool {
    v.is_empty()
}

fn is_empty_bytes(v: &ByteBuf) -> bool {
    v.is_empty()
}

// Field names double as wire keys; keep them alphabetical.
#[derive(Serialize)]
struct WireTransaction {
    #[serde(skip_serializing_if = "is_zero_u64")]
    aamt: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    apar: Option<WireAssetParams>,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    arcv: ByteBuf,
    #[serde(skip_serializing_if = "is_zero_u64")]
    fee: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    fv: u64,
    #[serde(skip_serializing_if = "is_empty_str")]
    gen: String,
    gh: ByteBuf,
    #[serde(skip_serializing_if = "is_zero_u64")]
    lv: u64,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    note: ByteBuf,
    snd: ByteBuf,
    #[serde(rename = "type")]
    type_: &'static str,
    #[serde(skip_serializing_if = "is_zero_u64")]
    xaid: u64,
}

#[derive(Serialize)]
struct WireAssetParams {
    #[serde(skip_serializing_if = "is_empty_str")]
    an: String,
    #[serde(skip_serializing_if = "is_empty_str")]
    au: String,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    c: ByteBuf,
    #[serde(skip_serializing_if = "is_zero_u32")]
    dc: u32,
    #[serde(skip_serializing_if = "is_false")]
    df: bool,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    f: ByteBuf,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    m: ByteBuf,
    #[serde(skip_serializing_if = "is_empty_bytes")]
    r: ByteBuf,
    #[serde(skip_serializing_if = "is_zero_u64")]
    t: u64,
    #[serde(skip_serializing_if = "is_empty_str")]
    un: String,
}

#[derive(Serialize)]
struct WireSignedTransaction {
    sig: ByteBuf,
    txn: WireTransaction,
}

fn address_bytes(addr: &crate::crypto::Address) -> ByteBuf {
    ByteBuf::from(addr.as_bytes().to_vec())
}

fn optional_address_bytes(addr: &Option<crate::crypto::Address>) -> ByteBuf {
    match addr {
        Some(a) => address_bytes(a),
        None => ByteBuf::new(),
    }
}

fn to_wire(txn: &Transaction) -> WireTransaction {
    let mut wire = WireTransaction {
        aamt: 0,
        apar: None,
        arcv: ByteBuf::new(),
        fee: txn.fee,
        fv: txn.first_valid,
        gen: txn.genesis_id.clone(),
        gh: ByteBuf::from(txn.genesis_hash.to_vec()),
        lv: txn.last_valid,
        note: ByteBuf::from(txn.note.clone()),
        snd: address_bytes(&txn.sender),
        type_: "",
        xaid: 0,
    };

    match &txn.body {
        TransactionType::AssetConfig(body) => {
            wire.type_ = "acfg";
            wire.apar = Some(WireAssetParams {
                an: body.asset_name.clone(),
                au: body.url.clone(),
                c: optional_address_bytes(&body.clawback),
                dc: body.decimals,
                df: body.default_frozen,
                f: optional_address_bytes(&body.freeze),
                m: optional_address_bytes(&body.manager),
                r: optional_address_bytes(&body.reserve),
                t: body.total,
                un: body.unit_name.clone(),
            });
        }
        TransactionType::AssetTransfer(body) => {
            wire.type_ = "axfer";
            wire.aamt = body.amount;
            wire.arcv = address_bytes(&body.receiver);
            wire.xaid = body.asset_id;
        }
    }

    wire
}

fn pack<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| Error::Encoding(e.to_string()))
}

/// Canonical msgpack bytes of the unsigned transaction.
pub fn transaction_bytes(txn: &Transaction) -> Result<Vec<u8>> {
    pack(&to_wire(txn))
}

/// The bytes an account signs: `"TX"` prefix plus the canonical encoding.
pub fn signing_bytes(txn: &Transaction) -> Result<Vec<u8>> {
    let encoded = transaction_bytes(txn)?;
    let mut out = Vec::with_capacity(TX_PREFIX.len() + encoded.len());
    out.extend_from_slice(TX_PREFIX);
    out.extend_from_slice(&encoded);
    Ok(out)
}

/// Derive the transaction id from the canonical encoding.
pub fn transaction_id(txn: &Transaction) -> Result<String> {
    let digest = Sha512_256::digest(signing_bytes(txn)?);
    Ok(BASE32_NOPAD.encode(digest.as_slice()))
}

/// Canonical msgpack bytes of the signed envelope.
pub fn signed_transaction_bytes(signed: &SignedTransaction) -> Result<Vec<u8>> {
    pack(&WireSignedTransaction {
        sig: ByteBuf::from(signed.sig.to_vec()),
        txn: to_wire(&signed.txn),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algod::models::SuggestedParams;
    use crate::crypto::Account;

    fn params() -> SuggestedParams {
        SuggestedParams {
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: [1u8; 32],
            first_valid: 1000,
            last_valid: 2000,
            fee: 1000,
            min_fee: 1000,
        }
    }

    #[test]
    fn test_opt_in_encoding_is_canonical() {
        let sender = Account::from_seed([5u8; 32]).address();
        let txn = Transaction::asset_opt_in(sender, &params(), 42);
        let bytes = transaction_bytes(&txn).unwrap();

        // Nine present fields (aamt and note are zero-valued and omitted),
        // first key in lexicographic order is "arcv".
        assert_eq!(bytes[0], 0x89);
        assert_eq!(&bytes[1..6], &[0xa4, b'a', b'r', b'c', b'v']);
    }

    #[test]
    fn test_asset_create_encoding_is_canonical() {
        let sender = Account::from_seed([5u8; 32]).address();
        let txn = Transaction::asset_create(sender, &params(), "BS Computer Science", "ipfs://abc");
        let bytes = transaction_bytes(&txn).unwrap();

        // Eight present fields, first key is "apar".
        assert_eq!(bytes[0], 0x88);
        assert_eq!(&bytes[1..6], &[0xa4, b'a', b'p', b'a', b'r']);
    }

    #[test]
    fn test_signed_envelope_layout() {
        let account = Account::from_seed([5u8; 32]);
        let txn = Transaction::asset_opt_in(account.address(), &params(), 42);
        let bytes = txn.sign(&account).unwrap().to_bytes().unwrap();

        // Two-entry map: sig before txn.
        assert_eq!(bytes[0], 0x82);
        assert_eq!(&bytes[1..5], &[0xa3, b's', b'i', b'g']);
    }

    #[test]
    fn test_transaction_id_is_stable_and_distinct() {
        let sender = Account::from_seed([5u8; 32]).address();
        let a = Transaction::asset_opt_in(sender, &params(), 1);
        let b = Transaction::asset_opt_in(sender, &params(), 2);

        assert_eq!(a.id().unwrap(), a.id().unwrap());
        assert_ne!(a.id().unwrap(), b.id().unwrap());
        assert_eq!(a.id().unwrap().len(), 52);
    }
}

//! Algorand address encoding.
//!
//! An address is the 32-byte ed25519 public key rendered as RFC 4648 base32
//! (no padding) over `pubkey || checksum`, where the checksum is the last
//! four bytes of SHA-512/256 of the public key. The rendered form is always
//! 58 characters.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

use crate::error::Error;

const CHECKSUM_LEN: usize = 4;

/// A wallet address (institution or student identity).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Build an address from raw public key bytes.
    pub fn new(public_key: [u8; 32]) -> Self {
        Self(public_key)
    }

    /// The underlying public key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(self.0);
        let bytes = digest.as_slice();
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&bytes[bytes.len() - CHECKSUM_LEN..]);
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 32 + CHECKSUM_LEN];
        buf[..32].copy_from_slice(&self.0);
        buf[32..].copy_from_slice(&self.checksum());
        f.write_str(&BASE32_NOPAD.encode(&buf))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| Error::Encoding(format!("address is not valid base32: {}", e)))?;

        if decoded.len() != 32 + CHECKSUM_LEN {
            return Err(Error::Encoding(format!(
                "address decodes to {} bytes, expected {}",
                decoded.len(),
                32 + CHECKSUM_LEN
            )));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&decoded[..32]);
        let address = Address(key);

        if decoded[32..] != address.checksum() {
            return Err(Error::Encoding("address checksum mismatch".to_string()));
        }

        Ok(address)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let addr = Address::new([7u8; 32]);
        let rendered = addr.to_string();
        assert_eq!(rendered.len(), 58);

        let parsed: Address = rendered.parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_zero_address() {
        // The all-zero key is the well-known zero address.
        let addr = Address::new([0u8; 32]);
        assert_eq!(
            addr.to_string(),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ"
        );
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let mut rendered = Address::new([7u8; 32]).to_string();
        // Flip the final character to break the checksum.
        let last = rendered.pop().unwrap();
        rendered.push(if last == 'A' { 'B' } else { 'A' });

        let result: Result<Address, _> = rendered.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_not_base32_rejected() {
        let result: Result<Address, _> = "not an address!".parse();
        assert!(result.is_err());
    }
}

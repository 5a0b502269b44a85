//! The network's 25-word mnemonic encoding of a 32-byte signing key.
//!
//! Keys are chunked into 11-bit little-endian indices over the BIP39 English
//! wordlist (24 data words), followed by a checksum word taken from the first
//! 11 bits of SHA-512/256 of the key. This is the same wordlist BIP39 uses
//! but a different checksum scheme.

use bip39::Language;
use sha2::{Digest, Sha512_256};

use crate::error::{Error, Result};

const WORD_COUNT: usize = 25;
const KEY_LEN: usize = 32;

fn wordlist() -> &'static [&'static str] {
    Language::English.words_by_prefix("")
}

fn word_index(word: &str) -> Option<u16> {
    wordlist()
        .binary_search_by(|probe| str::cmp(probe, word))
        .ok()
        .map(|i| i as u16)
}

/// Pack bytes into 11-bit little-endian indices.
fn to_11_bit(data: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(data.len() * 8 / 11 + 1);
    let mut buf = 0u32;
    let mut bits = 0u32;
    for &byte in data {
        buf |= (byte as u32) << bits;
        bits += 8;
        if bits >= 11 {
            out.push((buf & 0x7ff) as u16);
            buf >>= 11;
            bits -= 11;
        }
    }
    if bits > 0 {
        out.push((buf & 0x7ff) as u16);
    }
    out
}

/// Unpack 11-bit little-endian indices back into bytes.
fn from_11_bit(indices: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len() * 11 / 8 + 1);
    let mut buf = 0u32;
    let mut bits = 0u32;
    for &index in indices {
        buf |= (index as u32) << bits;
        bits += 11;
        while bits >= 8 {
            out.push((buf & 0xff) as u8);
            buf >>= 8;
            bits -= 8;
        }
    }
    out
}

fn checksum_index(key: &[u8; KEY_LEN]) -> u16 {
    let digest = Sha512_256::digest(key);
    to_11_bit(&digest.as_slice()[..2])[0]
}

/// Encode a 32-byte signing key as a 25-word recovery phrase.
pub fn from_key(key: &[u8; KEY_LEN]) -> String {
    let list = wordlist();
    let mut words: Vec<&str> = to_11_bit(key)
        .into_iter()
        .map(|i| list[i as usize])
        .collect();
    words.push(list[checksum_index(key) as usize]);
    words.join(" ")
}

/// Decode a 25-word recovery phrase back into the signing key.
///
/// Rejects phrases with the wrong word count, words outside the wordlist,
/// and checksum mismatches.
pub fn to_key(phrase: &str) -> Result<[u8; KEY_LEN]> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != WORD_COUNT {
        return Err(Error::InvalidMnemonic(format!(
            "expected {} words, got {}",
            WORD_COUNT,
            words.len()
        )));
    }

    let mut indices = Vec::with_capacity(WORD_COUNT);
    for word in &words {
        match word_index(word) {
            Some(i) => indices.push(i),
            None => {
                return Err(Error::InvalidMnemonic(format!(
                    "word not in wordlist: {}",
                    word
                )))
            }
        }
    }

    let checksum = indices.pop().unwrap_or_default();
    let bytes = from_11_bit(&indices);

    // 24 * 11 bits unpack to 33 bytes; the final byte carries only padding.
    if bytes.len() != KEY_LEN + 1 || bytes[KEY_LEN] != 0 {
        return Err(Error::InvalidMnemonic("phrase does not encode a key".to_string()));
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes[..KEY_LEN]);

    if checksum != checksum_index(&key) {
        return Err(Error::InvalidMnemonic("checksum mismatch".to_string()));
    }

    Ok(key)
}

/// Return every token of the phrase that is not in the wordlist.
///
/// An empty result means all words are spellable; it does not imply the
/// phrase as a whole passes the checksum.
pub fn invalid_words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .filter(|w| word_index(w).is_none())
        .map(|w| w.to_string())
        .collect()
}

/// Brute-force the missing 25th word of a 24-word phrase.
///
/// Returns every wordlist word that completes the phrase to a valid
/// mnemonic. For well-formed input this is at most one word.
pub fn recover_checksum_word(phrase_24: &str) -> Vec<String> {
    wordlist()
        .iter()
        .filter_map(|word| {
            let candidate = format!("{} {}", phrase_24.trim(), word);
            to_key(&candidate).ok().map(|_| word.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The zero key is the canonical test vector: 24 repetitions of the
    // first wordlist word plus its checksum word.
    #[test]
    fn test_zero_key_vector() {
        let phrase = from_key(&[0u8; KEY_LEN]);
        let expected = format!("{}invest", "abandon ".repeat(24));
        assert_eq!(phrase, expected);
    }

    #[test]
    fn test_roundtrip() {
        let mut key = [0u8; KEY_LEN];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = i as u8;
        }

        let phrase = from_key(&key);
        assert_eq!(phrase.split_whitespace().count(), WORD_COUNT);
        assert_eq!(to_key(&phrase).unwrap(), key);
    }

    #[test]
    fn test_wrong_word_count() {
        let err = to_key("abandon abandon abandon").unwrap_err();
        assert!(err.to_string().contains("expected 25 words"));
    }

    #[test]
    fn test_unknown_word_rejected() {
        let mut words: Vec<String> = from_key(&[3u8; KEY_LEN])
            .split_whitespace()
            .map(String::from)
            .collect();
        words[5] = "zzzzzz".to_string();
        let err = to_key(&words.join(" ")).unwrap_err();
        assert!(matches!(err, Error::InvalidMnemonic(_)));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let phrase = from_key(&[3u8; KEY_LEN]);
        let mut words: Vec<&str> = phrase.split_whitespace().collect();
        // Swap the checksum word for an unrelated valid word.
        words[24] = if words[24] == "abandon" { "ability" } else { "abandon" };
        let err = to_key(&words.join(" ")).unwrap_err();
        assert!(matches!(err, Error::InvalidMnemonic(_)));
    }

    #[test]
    fn test_invalid_words_reports_offenders() {
        let rejected = invalid_words("abandon notaword ability alsofake");
        assert_eq!(rejected, vec!["notaword".to_string(), "alsofake".to_string()]);

        assert!(invalid_words("abandon ability able").is_empty());
    }

    #[test]
    fn test_recover_checksum_word() {
        let phrase = from_key(&[9u8; KEY_LEN]);
        let (head, tail) = phrase.rsplit_once(' ').unwrap();

        let candidates = recover_checksum_word(head);
        assert_eq!(candidates, vec![tail.to_string()]);
    }
}

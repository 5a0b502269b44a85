//! Crate-wide error definitions.

use thiserror::Error;

/// Errors surfaced by issuance, query, pinning and key-derivation operations.
///
/// Every external-boundary failure maps onto exactly one variant; nothing is
/// retried automatically. Retry policy, if any, belongs to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The recovery phrase is not a valid mnemonic (wrong word count,
    /// unknown word, or checksum mismatch). Local and non-retryable.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// The registry declined the intent (malformed, unauthorized, or a
    /// precondition such as opt-in was violated). Carries the node's
    /// diagnostic body.
    #[error("transaction rejected by the network: {0}")]
    SubmissionRejected(String),

    /// The intent was accepted into the submission queue but not finalized
    /// within the round bound. Outcome is ambiguous; callers must re-query
    /// before retrying to avoid duplicate side effects.
    #[error("transaction not confirmed within {rounds} rounds")]
    ConfirmationTimeout { rounds: u64 },

    /// The metadata store round trip failed; carries the response body.
    #[error("pinning service unavailable: {0}")]
    StoreUnavailable(String),

    /// The indexer does not know this asset identifier.
    #[error("asset {0} not found")]
    NotFound(u64),

    /// Contract-model gate: the caller is not the authorized institution.
    #[error("only the authorized institution can issue credentials")]
    UnauthorizedSender,

    /// Network-level failure before the remote endpoint could accept or
    /// reject the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// Local canonical-encoding failure (msgpack, base64, address parsing).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Missing or invalid environment configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Local file access failure (deployment record, certificate input).
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

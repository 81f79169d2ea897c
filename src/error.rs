//! Error types for tronpay.

use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the codec, converter, decoder and configuration layers.
///
/// The verifier never surfaces these to its caller; it folds each one into a
/// [`crate::payment::Reason`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Binary address has the wrong length or version byte.
    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// Text contains characters outside the Base58 alphabet, or is too short.
    #[error("invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    /// Trailing checksum does not match the double SHA-256 of the payload.
    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// Decimal or integer amount string could not be parsed.
    #[error("malformed amount: {0}")]
    MalformedAmount(String),

    /// Call data does not start with the token transfer selector.
    #[error("unsupported call signature: {0}")]
    UnsupportedCallSignature(String),

    /// Call data has the transfer selector but a broken layout.
    #[error("malformed call data: {0}")]
    MalformedCallData(String),

    /// Indexer response could not be turned into a transaction record.
    #[error("malformed transaction record: {0}")]
    MalformedRecord(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

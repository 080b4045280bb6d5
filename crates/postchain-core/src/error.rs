//! Error types for Postchain Core.

use thiserror::Error;

/// Core errors that can occur while building, encoding or decoding transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The header's type/receiver/criticized-hash combination is inconsistent.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A key string could not be decoded into a point on P-256.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// A signature string could not be decoded into its (R, S) components.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// A key or signature belongs to a curve other than P-256.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Validation errors: the reason a transaction did not verify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("signature verification failed")]
    SignatureFailed,

    #[error("post hash does not match payload and timestamp")]
    PostHashMismatch,

    #[error("post id does not match post hash")]
    PostIdMismatch,

    #[error("transaction hash does not match type, timestamp and post hash")]
    TransactionHashMismatch,

    #[error("header invariant violated: {0}")]
    HeaderInvariant(String),

    #[error("structural error: {0}")]
    StructuralError(String),

    /// A field could not be decoded at all.
    #[error(transparent)]
    Malformed(#[from] CoreError),
}

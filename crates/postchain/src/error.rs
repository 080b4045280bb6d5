//! Error types for the Postchain API.

use postchain_core::CoreError;
use thiserror::Error;

/// Errors that can occur during author operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Core error (header, key, signature or codec).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Payload exceeds the configured limit.
    #[error("payload too large: {len} bytes (max {max})")]
    PayloadTooLarge { len: usize, max: usize },

    /// The transaction being critiqued does not verify.
    #[error("critique target {0} does not verify")]
    InvalidTarget(String),

    /// A transaction we just built did not pass verification.
    #[error("self-check failed for transaction {0}")]
    SelfCheckFailed(String),
}

/// Result type for Postchain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error types for guestbook-core.
///
/// Uses `thiserror` so the server and CLI can match on what went wrong.
/// Store failures pass through unchanged via `#[error(transparent)]`.
use thiserror::Error;

use crate::store::StoreError;

/// Main error type for guestbook operations
#[derive(Error, Debug)]
pub enum GuestbookError {
    /// Gift key is not present in the static catalog
    #[error("Invalid giftId: {gift_id}")]
    InvalidGiftReference { gift_id: String },

    /// The store accepted the write but returned no generated key
    #[error("Failed to generate post key")]
    KeyGeneration,

    /// Configuration is missing or malformed
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Underlying store or network failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for guestbook-core operations
pub type Result<T> = std::result::Result<T, GuestbookError>;

impl GuestbookError {
    /// Create an invalid gift reference error
    pub fn invalid_gift(gift_id: impl Into<String>) -> Self {
        Self::InvalidGiftReference {
            gift_id: gift_id.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

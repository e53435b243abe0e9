use std::path::PathBuf;

use cr_core::CoreError;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or querying ledger state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document exists for the requested campaign identifier.
    #[error("campaign not found: \"{0}\"")]
    CampaignNotFound(String),

    /// A document already exists for a campaign being created.
    #[error("campaign already exists: \"{0}\"")]
    CampaignExists(String),

    /// The storage medium failed.
    #[error("storage failure at {}: {source}", path.display())]
    Storage {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A persisted document exists but cannot be decoded.
    #[error("corrupt document at {}: {source}", path.display())]
    Corrupt {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The mutation engine rejected the request.
    #[error("{0}")]
    Core(#[from] CoreError),
}

// Passkeep — Top-level error types
//
// Aggregates errors from the store, vault, service, and clipboard modules
// into a single error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Passkeep operations.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Service(#[from] crate::service::ServiceError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Vault error: {0}")]
    Vault(#[from] crate::vault::VaultError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] crate::clipboard::ClipboardError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

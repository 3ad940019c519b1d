// Passkeep — Vault error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("keyring error: {0}")]
    Backend(String),

    #[error("vault index for service '{0}' is corrupted")]
    Index(String),
}

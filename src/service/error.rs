// Passkeep — Service error types
//
// Expected domain conditions (NotFound, Conflict) are values, not panics:
// every operation returns a typed failure carrying a message and an HTTP
// status code so the CLI and web callers decide presentation themselves.

use thiserror::Error;

use crate::store::StoreError;
use crate::vault::VaultError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Referenced organization or account does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate organization title or account email on create.
    #[error("{0} already exists")]
    Conflict(String),

    /// The OS secret store is unavailable or an operation on it failed.
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    /// The metadata file is unreadable or unwritable.
    #[error("metadata store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// HTTP status code this failure maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Vault(_) | ServiceError::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::NotFound("org".into()).status_code(), 404);
        assert_eq!(ServiceError::Conflict("org".into()).status_code(), 409);
        assert_eq!(
            ServiceError::Vault(VaultError::Backend("down".into())).status_code(),
            500
        );
    }
}

// Passkeep — Service Module
//
// The orchestration layer enforcing consistency between the metadata
// store and the vault. All CLI commands and HTTP routes go through it.

mod credentials;
mod error;

pub use credentials::{CredentialService, ListFilter, RevealOutcome, ToggleOutcome};
pub use error::ServiceError;

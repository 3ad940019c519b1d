// Passkeep — Vault Module
//
// OS-native secure secret storage behind a small trait. Secrets are keyed
// by (organization title, account email) and never pass through the
// metadata store.

mod adapter;
mod error;

pub use adapter::{KeyringVault, SecretVault};
pub use error::VaultError;

#[cfg(test)]
pub use adapter::mock;

// Passkeep — Secret Vault Adapter
//
// Thin contract over the platform keyring, keyed by
// (service = organization title, account = email).
//
// The platform keyring cannot enumerate entries under a service, so the
// production adapter keeps one index entry per service: a JSON array of
// account names stored under a reserved account id, updated on every
// set/delete. `list_secrets` reads that index; it exists so that cascade
// deletion of an organization can find every secret it owns.

use zeroize::Zeroizing;

use super::VaultError;

/// Reserved account id for the per-service index entry. Never a real email.
const INDEX_ACCOUNT: &str = "__passkeep-index__";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over OS-native secret storage, enabling platform backends
/// and mock implementations for testing.
pub trait SecretVault: Send + Sync {
    /// Upsert a secret. Fails if the keyring backend is unavailable.
    fn set_secret(&self, service: &str, account: &str, value: &str) -> Result<(), VaultError>;

    /// Fetch a secret. A missing entry is `None`, never an error.
    fn get_secret(
        &self,
        service: &str,
        account: &str,
    ) -> Result<Option<Zeroizing<String>>, VaultError>;

    /// Delete a secret. Idempotent: deleting an absent entry is not an error.
    fn delete_secret(&self, service: &str, account: &str) -> Result<(), VaultError>;

    /// Enumerate account names with a secret under a service.
    fn list_secrets(&self, service: &str) -> Result<Vec<String>, VaultError>;
}

// ─── Platform Implementation ─────────────────────────────────────────────────

/// Production implementation using the `keyring` crate.
/// Dispatches to:
///   - Linux: D-Bus Secret Service (GNOME Keyring / KDE Wallet)
///   - macOS: Security.framework Keychain
///   - Windows: Windows Credential Manager
pub struct KeyringVault;

impl KeyringVault {
    pub fn new() -> Self {
        Self
    }

    fn entry(service: &str, account: &str) -> Result<keyring::Entry, VaultError> {
        keyring::Entry::new(service, account)
            .map_err(|e| VaultError::Backend(format!("failed to create keyring entry: {}", e)))
    }

    fn read_index(service: &str) -> Result<Vec<String>, VaultError> {
        let entry = Self::entry(service, INDEX_ACCOUNT)?;
        match entry.get_password() {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|_| VaultError::Index(service.to_string()))
            }
            Err(keyring::Error::NoEntry) => Ok(Vec::new()),
            Err(e) => Err(VaultError::Backend(format!(
                "failed to read vault index: {}",
                e
            ))),
        }
    }

    fn write_index(service: &str, names: &[String]) -> Result<(), VaultError> {
        let entry = Self::entry(service, INDEX_ACCOUNT)?;
        if names.is_empty() {
            // Last secret gone: drop the index entry as well.
            return match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(VaultError::Backend(format!(
                    "failed to remove vault index: {}",
                    e
                ))),
            };
        }
        let json = serde_json::to_string(names)
            .map_err(|_| VaultError::Index(service.to_string()))?;
        entry
            .set_password(&json)
            .map_err(|e| VaultError::Backend(format!("failed to update vault index: {}", e)))
    }
}

impl Default for KeyringVault {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretVault for KeyringVault {
    fn set_secret(&self, service: &str, account: &str, value: &str) -> Result<(), VaultError> {
        Self::entry(service, account)?
            .set_password(value)
            .map_err(|e| VaultError::Backend(format!("failed to store secret: {}", e)))?;

        let mut names = Self::read_index(service)?;
        if !names.iter().any(|n| n == account) {
            names.push(account.to_string());
            Self::write_index(service, &names)?;
        }

        tracing::debug!(service, account, "Secret stored in keyring");
        Ok(())
    }

    fn get_secret(
        &self,
        service: &str,
        account: &str,
    ) -> Result<Option<Zeroizing<String>>, VaultError> {
        match Self::entry(service, account)?.get_password() {
            Ok(value) => Ok(Some(Zeroizing::new(value))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(VaultError::Backend(format!(
                "failed to retrieve secret: {}",
                e
            ))),
        }
    }

    fn delete_secret(&self, service: &str, account: &str) -> Result<(), VaultError> {
        match Self::entry(service, account)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => {
                return Err(VaultError::Backend(format!(
                    "failed to delete secret: {}",
                    e
                )))
            }
        }

        let mut names = Self::read_index(service)?;
        let before = names.len();
        names.retain(|n| n != account);
        if names.len() != before {
            Self::write_index(service, &names)?;
        }

        tracing::debug!(service, account, "Secret removed from keyring");
        Ok(())
    }

    fn list_secrets(&self, service: &str) -> Result<Vec<String>, VaultError> {
        Self::read_index(service)
    }
}

// ─── In-Memory Mock for Testing ──────────────────────────────────────────────

/// A mock vault that stores secrets in memory, with failure injection for
/// the write and delete paths. Used by unit tests so we never touch the
/// real platform keyring.
#[cfg(test)]
pub mod mock {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::*;

    pub struct MemoryVault {
        entries: Mutex<BTreeMap<(String, String), String>>,
        fail_writes: AtomicBool,
        fail_deletes: AtomicBool,
    }

    impl MemoryVault {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(BTreeMap::new()),
                fail_writes: AtomicBool::new(false),
                fail_deletes: AtomicBool::new(false),
            }
        }

        /// Make every subsequent `set_secret` fail, simulating an
        /// unavailable keyring.
        pub fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Make every subsequent `delete_secret` fail.
        pub fn set_fail_deletes(&self, fail: bool) {
            self.fail_deletes.store(fail, Ordering::SeqCst);
        }

        /// Number of live entries across all services.
        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    impl SecretVault for MemoryVault {
        fn set_secret(
            &self,
            service: &str,
            account: &str,
            value: &str,
        ) -> Result<(), VaultError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(VaultError::Backend("keyring unavailable".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .insert((service.to_string(), account.to_string()), value.to_string());
            Ok(())
        }

        fn get_secret(
            &self,
            service: &str,
            account: &str,
        ) -> Result<Option<Zeroizing<String>>, VaultError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .get(&(service.to_string(), account.to_string()))
                .map(|v| Zeroizing::new(v.clone())))
        }

        fn delete_secret(&self, service: &str, account: &str) -> Result<(), VaultError> {
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(VaultError::Backend("keyring unavailable".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .remove(&(service.to_string(), account.to_string()));
            Ok(())
        }

        fn list_secrets(&self, service: &str) -> Result<Vec<String>, VaultError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .keys()
                .filter(|(s, _)| s == service)
                .map(|(_, a)| a.clone())
                .collect())
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

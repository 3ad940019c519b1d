// Passkeep — Credential Service
//
// Orchestrates the metadata store and the secret vault behind one
// consistent API. The two stores share no transaction, so every write
// path follows a fixed order:
//
//   adds/updates:  stage metadata in memory → vault write → persist metadata
//   deletes:       vault delete (idempotent) → remove metadata → persist
//
// A crash between steps leaves at most an orphaned vault entry, never a
// metadata record without a backing secret.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::store::{Account, MetaStore, OrgCollection, Organization};
use crate::vault::SecretVault;

use super::ServiceError;

/// Filter for `list_organizations`. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub favourite: Option<bool>,
    pub archived: Option<bool>,
}

/// Result of flipping an organization flag.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The flag's new value.
    pub enabled: bool,
    /// Human-readable status, a direct function of the new value.
    pub message: String,
}

/// Result of revealing a secret for an account that exists in metadata.
#[derive(Debug)]
pub enum RevealOutcome {
    Secret(Zeroizing<String>),
    /// Metadata exists but the vault has no entry. A detectable
    /// consistency violation that callers should surface as a warning.
    MissingFromVault,
}

pub struct CredentialService {
    store: MetaStore,
    vault: Arc<dyn SecretVault>,
}

impl CredentialService {
    pub fn new(store: MetaStore, vault: Arc<dyn SecretVault>) -> Self {
        Self { store, vault }
    }

    // ─── Writes ──────────────────────────────────────────────────────────────

    /// Create an empty organization. Title uniqueness is case-insensitive.
    pub fn create_organization(
        &self,
        title: &str,
        domain: Option<String>,
    ) -> Result<OrgCollection, ServiceError> {
        let mut collection = self.store.load()?;

        if collection.contains_title(title) {
            return Err(ServiceError::Conflict(format!("organization '{}'", title)));
        }

        collection.orgs.push(Organization::new(title, domain));
        self.store.save(&collection)?;

        tracing::info!(title, "Organization created");
        Ok(collection)
    }

    /// Add a credential, creating the organization inline if needed.
    /// Organization lookup is by title only; `domain` is used only when the
    /// organization is created here.
    ///
    /// The metadata mutation is staged in memory and persisted only after
    /// the vault write succeeds; on vault failure the staged mutation is
    /// discarded.
    pub fn add_credential(
        &self,
        title: &str,
        domain: Option<String>,
        email: &str,
        secret: &str,
        description: Option<String>,
    ) -> Result<OrgCollection, ServiceError> {
        let mut collection = self.store.load()?;

        // Vault entries are keyed by the stored casing of the title, which
        // may differ from what the caller passed.
        let service = match collection.find_org_mut(title) {
            Some(org) => {
                if org.find_account(email).is_some() {
                    return Err(ServiceError::Conflict(format!("account '{}'", email)));
                }
                org.accounts.push(Account::new(email, description));
                org.title.clone()
            }
            None => {
                let mut org = Organization::new(title, domain);
                org.accounts.push(Account::new(email, description));
                collection.orgs.push(org);
                title.to_string()
            }
        };

        // Vault first: if this fails, the staged metadata above is dropped.
        self.vault.set_secret(&service, email, secret)?;
        self.store.save(&collection)?;

        tracing::info!(title = %service, email, "Credential added");
        Ok(collection)
    }

    /// Replace the secret for an existing account. Metadata content does
    /// not change, but persisting re-confirms consistency.
    pub fn update_credential(
        &self,
        title: &str,
        email: &str,
        new_secret: &str,
    ) -> Result<(), ServiceError> {
        let collection = self.store.load()?;
        let org = collection
            .find_org(title)
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{}'", title)))?;
        if org.find_account(email).is_none() {
            return Err(ServiceError::NotFound(format!("account '{}'", email)));
        }

        self.vault.set_secret(&org.title, email, new_secret)?;
        self.store.save(&collection)?;

        tracing::info!(title = %org.title, email, "Credential updated");
        Ok(())
    }

    /// Delete one credential: vault entry first, then the metadata record.
    /// Vault deletion is idempotent, so a retry after a failure is safe.
    pub fn delete_credential(&self, title: &str, email: &str) -> Result<(), ServiceError> {
        let mut collection = self.store.load()?;
        let org = collection
            .find_org_mut(title)
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{}'", title)))?;
        if org.find_account(email).is_none() {
            return Err(ServiceError::NotFound(format!("account '{}'", email)));
        }
        let service = org.title.clone();

        // Vault delete must succeed before any metadata change.
        self.vault.delete_secret(&service, email)?;

        org.remove_account(email);
        self.store.save(&collection)?;

        tracing::info!(title = %service, email, "Credential deleted");
        Ok(())
    }

    /// Delete an organization and cascade-delete all its vault secrets.
    /// Per-secret deletion is best-effort: a failure is logged, not fatal,
    /// since a stray vault entry is preferable to a permanently
    /// undeletable organization.
    pub fn delete_organization(&self, title: &str) -> Result<(), ServiceError> {
        let mut collection = self.store.load()?;
        let org = collection
            .find_org(title)
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{}'", title)))?;

        let accounts = match self.vault.list_secrets(&org.title) {
            Ok(names) => names,
            Err(e) => {
                // Enumeration failed; fall back to the metadata account list
                // so the cascade still runs.
                tracing::warn!(title, error = %e, "Vault enumeration failed, using metadata list");
                org.accounts.iter().map(|a| a.email.clone()).collect()
            }
        };

        let service = org.title.clone();
        for account in &accounts {
            if let Err(e) = self.vault.delete_secret(&service, account) {
                tracing::warn!(title, account, error = %e, "Failed to delete vault secret");
            }
        }

        collection.remove_org(title);
        self.store.save(&collection)?;

        tracing::info!(title, secrets = accounts.len(), "Organization deleted");
        Ok(())
    }

    /// Flip the favourite flag. Returns the new state and a status message.
    pub fn toggle_favourite(&self, title: &str) -> Result<ToggleOutcome, ServiceError> {
        self.toggle_flag(title, |org| {
            org.favourite = !org.favourite;
            (
                org.favourite,
                if org.favourite {
                    "added to favourites"
                } else {
                    "removed from favourites"
                },
            )
        })
    }

    /// Flip the archived flag. Returns the new state and a status message.
    pub fn toggle_archived(&self, title: &str) -> Result<ToggleOutcome, ServiceError> {
        self.toggle_flag(title, |org| {
            org.archived = !org.archived;
            (
                org.archived,
                if org.archived {
                    "moved to archive"
                } else {
                    "restored from archive"
                },
            )
        })
    }

    fn toggle_flag(
        &self,
        title: &str,
        flip: impl FnOnce(&mut Organization) -> (bool, &'static str),
    ) -> Result<ToggleOutcome, ServiceError> {
        let mut collection = self.store.load()?;
        let org = collection
            .find_org_mut(title)
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{}'", title)))?;

        let (enabled, message) = flip(org);
        let message = format!("{} {}", title, message);
        self.store.save(&collection)?;

        tracing::info!(title, enabled, "Organization flag toggled");
        Ok(ToggleOutcome { enabled, message })
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    /// List organizations matching the filter. Pure read.
    pub fn list_organizations(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<Organization>, ServiceError> {
        let collection = self.store.load()?;
        Ok(collection
            .orgs
            .into_iter()
            .filter(|org| {
                filter.favourite.map_or(true, |f| org.favourite == f)
                    && filter.archived.map_or(true, |a| org.archived == a)
            })
            .collect())
    }

    /// Accounts of one organization. Empty (not an error) when the
    /// organization does not exist.
    pub fn get_accounts_of(&self, title: &str) -> Result<Vec<Account>, ServiceError> {
        let collection = self.store.load()?;
        Ok(collection
            .find_org(title)
            .map(|org| org.accounts.clone())
            .unwrap_or_default())
    }

    /// Fetch a secret. Existence is checked against metadata, not the
    /// vault; a vault miss despite live metadata is reported as the
    /// `MissingFromVault` sentinel rather than an error.
    pub fn reveal_secret(&self, title: &str, email: &str) -> Result<RevealOutcome, ServiceError> {
        let collection = self.store.load()?;
        let org = collection
            .find_org(title)
            .ok_or_else(|| ServiceError::NotFound(format!("organization '{}'", title)))?;
        if org.find_account(email).is_none() {
            return Err(ServiceError::NotFound(format!("account '{}'", email)));
        }

        match self.vault.get_secret(&org.title, email)? {
            Some(secret) => Ok(RevealOutcome::Secret(secret)),
            None => {
                tracing::warn!(
                    title,
                    email,
                    "Metadata exists but vault has no entry (consistency violation)"
                );
                Ok(RevealOutcome::MissingFromVault)
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

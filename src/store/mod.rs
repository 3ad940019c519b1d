// Passkeep — Store Module
//
// Durable, non-secret record of organizations, accounts, and flags.
// Backed by a JSON file at the platform config location; secrets are
// never written here.

mod error;
mod file;
mod models;

pub use error::StoreError;
pub use file::MetaStore;
pub use models::{Account, OrgCollection, Organization};

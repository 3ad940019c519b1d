// Passkeep — Organization and account data models
//
// Non-secret metadata only: the credential value itself never appears in
// these records. It lives in the platform keyring, keyed by
// (organization title, account email).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The complete metadata document, as persisted on disk.
/// Wire shape: `{ "orgs": [ ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgCollection {
    #[serde(default)]
    pub orgs: Vec<Organization>,
}

impl OrgCollection {
    /// Look up an organization by title, case-insensitively.
    pub fn find_org(&self, title: &str) -> Option<&Organization> {
        self.orgs
            .iter()
            .find(|org| org.title.eq_ignore_ascii_case(title))
    }

    /// Mutable variant of [`find_org`](Self::find_org).
    pub fn find_org_mut(&mut self, title: &str) -> Option<&mut Organization> {
        self.orgs
            .iter_mut()
            .find(|org| org.title.eq_ignore_ascii_case(title))
    }

    /// Whether a title is already taken (case-insensitive uniqueness).
    pub fn contains_title(&self, title: &str) -> bool {
        self.find_org(title).is_some()
    }

    /// Remove an organization by title. Returns true if it existed.
    pub fn remove_org(&mut self, title: &str) -> bool {
        let before = self.orgs.len();
        self.orgs
            .retain(|org| !org.title.eq_ignore_ascii_case(title));
        self.orgs.len() != before
    }
}

/// A named grouping (website/company) holding zero or more accounts.
/// Account order is insertion order and is significant for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub title: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub favourite: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Organization {
    pub fn new(title: impl Into<String>, domain: Option<String>) -> Self {
        Self {
            title: title.into(),
            domain,
            favourite: false,
            archived: false,
            accounts: Vec::new(),
        }
    }

    /// Look up an account by email. Emails are case-sensitive as stored.
    pub fn find_account(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.email == email)
    }

    /// Remove an account by email. Returns true if it existed.
    pub fn remove_account(&mut self, email: &str) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|acc| acc.email != email);
        self.accounts.len() != before
    }
}

/// One account under an organization. The secret is NOT here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Day-granular creation stamp, set once and immutable thereafter.
    #[serde(rename = "createdAt", with = "wire_date")]
    pub created_at: NaiveDate,
}

impl Account {
    /// New account stamped with today's (local) date.
    pub fn new(email: impl Into<String>, description: Option<String>) -> Self {
        Self {
            email: email.into(),
            description,
            created_at: chrono::Local::now().date_naive(),
        }
    }
}

/// Legacy `DD-MM-YYYY` date format used by the metadata file.
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

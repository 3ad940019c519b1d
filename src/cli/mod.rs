// Passkeep — CLI Module
//
// Command-line interface using clap derive macros. Missing positional
// arguments fall back to interactive prompts over the existing
// organisations and accounts.

mod commands;
mod generate;
mod prompt;

use clap::{Parser, Subcommand};

pub use commands::execute;
pub use generate::generate_password;

/// Passkeep — local password manager backed by the OS keyring.
#[derive(Parser, Debug)]
#[command(name = "passkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show account metadata for one organisation, or lists of organisations.
    Show {
        /// The title of the organisation/website.
        title: Option<String>,

        /// List organisation titles only.
        #[arg(long)]
        orgs: bool,

        /// Only favourite organisations.
        #[arg(long)]
        fav: bool,

        /// Only archived organisations.
        #[arg(long)]
        archived: bool,

        /// All organisations with their accounts.
        #[arg(long)]
        all: bool,
    },

    /// Add a new credential (creates the organisation on first use).
    #[command(alias = "create")]
    Add {
        /// The title of the organisation/website.
        title: Option<String>,

        /// The new account's email/username.
        email: Option<String>,

        /// Optional description of the account.
        description: Option<String>,
    },

    /// Delete a credential, or an entire organisation with --org.
    Delete {
        /// The title of the organisation/website.
        title: Option<String>,

        /// The account's email/username.
        email: Option<String>,

        /// Delete the whole organisation and all its secrets.
        #[arg(long)]
        org: bool,
    },

    /// Copy a password to the clipboard (cleared again after 10 seconds).
    Copy {
        /// The title of the organisation/website.
        title: Option<String>,

        /// The account's email/username.
        email: Option<String>,
    },

    /// Update the password of an existing account.
    Update {
        /// The title of the organisation/website.
        title: Option<String>,

        /// The account's email/username.
        email: Option<String>,
    },

    /// Toggle an organisation's favourite flag.
    Fav {
        /// The title of the organisation/website.
        title: Option<String>,
    },

    /// Toggle an organisation's archived flag.
    Archive {
        /// The title of the organisation/website.
        title: Option<String>,
    },

    /// Generate a random password.
    Generate {
        /// Length of the password.
        #[arg(short, long, default_value_t = 16)]
        length: usize,

        /// Copy the generated password to the clipboard without asking.
        #[arg(short, long)]
        save: bool,
    },

    /// Start the local web server for the companion UI.
    Web {
        /// Port to listen on (loopback only).
        #[arg(long, default_value_t = crate::web::DEFAULT_PORT)]
        port: u16,
    },
}

// Passkeep — CLI Command Handlers
//
// Each function handles one CLI subcommand: it collects any missing fields
// via prompts, then calls exactly one Credential Service operation and
// presents its typed result.

use std::sync::Arc;

use colored::Colorize;

use crate::clipboard::{ClipboardGateway, ClipboardSink, SystemClipboard, CLEAR_DELAY_SECS};
use crate::error::AppError;
use crate::service::{CredentialService, ListFilter, RevealOutcome, ServiceError};
use crate::store::{MetaStore, Organization};
use crate::vault::KeyringVault;

use super::generate::generate_password;
use super::{prompt, Commands};

/// Execute the parsed CLI command.
pub async fn execute(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Show {
            title,
            orgs,
            fav,
            archived,
            all,
        } => cmd_show(title, orgs, fav, archived, all),
        Commands::Add {
            title,
            email,
            description,
        } => cmd_add(title, email, description),
        Commands::Delete { title, email, org } => cmd_delete(title, email, org),
        Commands::Copy { title, email } => cmd_copy(title, email).await,
        Commands::Update { title, email } => cmd_update(title, email),
        Commands::Fav { title } => cmd_fav(title),
        Commands::Archive { title } => cmd_archive(title),
        Commands::Generate { length, save } => cmd_generate(length, save),
        Commands::Web { port } => cmd_web(port).await,
    }
}

// ─── Show ────────────────────────────────────────────────────────────────────

fn cmd_show(
    title: Option<String>,
    orgs_only: bool,
    fav: bool,
    archived: bool,
    all: bool,
) -> Result<(), AppError> {
    let service = open_service()?;

    if orgs_only || fav || archived || all {
        let filter = if fav {
            ListFilter {
                favourite: Some(true),
                ..Default::default()
            }
        } else if archived {
            ListFilter {
                archived: Some(true),
                ..Default::default()
            }
        } else {
            ListFilter::default()
        };

        let orgs = service.list_organizations(filter)?;
        if orgs.is_empty() {
            println!("No organisations yet. Add one with `passkeep add`.");
            return Ok(());
        }

        if orgs_only {
            for org in &orgs {
                println!(
                    "{:<28} {}",
                    format!("{}{}", org.title, flag_markers(org)),
                    org.domain.as_deref().unwrap_or("-")
                );
            }
        } else {
            for org in &orgs {
                print_org(org);
            }
        }
        return Ok(());
    }

    let title = resolve_title(&service, title)?;
    let orgs = service.list_organizations(ListFilter::default())?;
    match orgs.iter().find(|o| o.title.eq_ignore_ascii_case(&title)) {
        Some(org) => print_org(org),
        None => {
            return Err(ServiceError::NotFound(format!("organization '{}'", title)).into());
        }
    }

    Ok(())
}

fn flag_markers(org: &Organization) -> String {
    let mut markers = String::new();
    if org.favourite {
        markers.push_str(" ★");
    }
    if org.archived {
        markers.push_str(" [archived]");
    }
    markers
}

fn print_org(org: &Organization) {
    println!(
        "\n{}{} ({})",
        org.title.bold(),
        flag_markers(org).yellow(),
        org.domain.as_deref().unwrap_or("-")
    );

    if org.accounts.is_empty() {
        println!("  (no accounts)");
        return;
    }

    println!(
        "{}",
        format!("  {:<32} {:<12} {}", "EMAIL", "CREATED", "DESCRIPTION").dimmed()
    );
    for account in &org.accounts {
        println!(
            "  {:<32} {:<12} {}",
            account.email,
            account.created_at.format("%d-%m-%Y"),
            account.description.as_deref().unwrap_or("-")
        );
    }
}

// ─── Add ─────────────────────────────────────────────────────────────────────

fn cmd_add(
    title: Option<String>,
    email: Option<String>,
    description: Option<String>,
) -> Result<(), AppError> {
    let service = open_service()?;

    let existing: Vec<String> = service
        .list_organizations(ListFilter::default())?
        .into_iter()
        .map(|org| org.title)
        .collect();

    let title = match title {
        Some(t) => t,
        None => prompt::select("What is the name of the organisation", &existing, true)?,
    };

    // Only a brand-new organisation gets asked for a domain.
    let is_new = !existing.iter().any(|t| t.eq_ignore_ascii_case(&title));
    let domain = if is_new {
        prompt::input_optional("What is the domain")?
    } else {
        None
    };

    let email = match email {
        Some(e) => e,
        None => prompt::input("What is your email/username")?,
    };
    let secret = prompt::secret("Enter the password")?;
    let description = match description {
        Some(d) => Some(d),
        None => prompt::input_optional("Any description")?,
    };

    service.add_credential(&title, domain, &email, &secret, description)?;
    println!(
        "{} Credential for {} stored under {}",
        "✓".green(),
        email.bold(),
        title.bold()
    );

    Ok(())
}

// ─── Delete ──────────────────────────────────────────────────────────────────

fn cmd_delete(
    title: Option<String>,
    email: Option<String>,
    whole_org: bool,
) -> Result<(), AppError> {
    let service = open_service()?;
    let title = resolve_title(&service, title)?;

    if whole_org {
        let question = format!(
            "Delete organisation '{}' and all of its secrets?",
            title
        );
        if !prompt::confirm(&question)? {
            println!("Operation cancelled.");
            return Ok(());
        }
        service.delete_organization(&title)?;
        println!("{} Organisation {} deleted", "✓".green(), title.bold());
        return Ok(());
    }

    let email = resolve_email(&service, &title, email)?;
    service.delete_credential(&title, &email)?;
    println!(
        "{} Credential {} deleted from {}",
        "✓".green(),
        email.bold(),
        title.bold()
    );

    Ok(())
}

// ─── Copy ────────────────────────────────────────────────────────────────────

async fn cmd_copy(title: Option<String>, email: Option<String>) -> Result<(), AppError> {
    let service = open_service()?;
    let title = resolve_title(&service, title)?;
    let email = resolve_email(&service, &title, email)?;

    if !prompt::confirm("Do you want to copy the password to the clipboard?")? {
        println!("Operation cancelled.");
        return Ok(());
    }

    match service.reveal_secret(&title, &email)? {
        RevealOutcome::Secret(secret) => {
            let gateway = ClipboardGateway::new(Arc::new(SystemClipboard));
            gateway.export_secret(&secret)?;
            println!(
                "Password copied to clipboard. It will be cleared in {} seconds.",
                CLEAR_DELAY_SECS
            );
            // Keep the process alive until the clear fires.
            gateway.wait_for_pending().await;
        }
        RevealOutcome::MissingFromVault => {
            println!(
                "{} metadata exists for {} / {} but the keyring holds no secret — the stores are out of sync",
                "warning:".yellow().bold(),
                title,
                email
            );
        }
    }

    Ok(())
}

// ─── Update ──────────────────────────────────────────────────────────────────

fn cmd_update(title: Option<String>, email: Option<String>) -> Result<(), AppError> {
    let service = open_service()?;
    let title = resolve_title(&service, title)?;
    let email = resolve_email(&service, &title, email)?;

    let secret = prompt::secret("Enter the new password")?;
    service.update_credential(&title, &email, &secret)?;
    println!(
        "{} Password for {} updated",
        "✓".green(),
        email.bold()
    );

    Ok(())
}

// ─── Flags ───────────────────────────────────────────────────────────────────

fn cmd_fav(title: Option<String>) -> Result<(), AppError> {
    let service = open_service()?;
    let title = resolve_title(&service, title)?;
    let outcome = service.toggle_favourite(&title)?;
    println!("{} {}", "✓".green(), outcome.message);
    Ok(())
}

fn cmd_archive(title: Option<String>) -> Result<(), AppError> {
    let service = open_service()?;
    let title = resolve_title(&service, title)?;
    let outcome = service.toggle_archived(&title)?;
    println!("{} {}", "✓".green(), outcome.message);
    Ok(())
}

// ─── Generate ────────────────────────────────────────────────────────────────

fn cmd_generate(length: usize, save: bool) -> Result<(), AppError> {
    if length == 0 {
        return Err(AppError::Validation(
            "password length must be at least 1".to_string(),
        ));
    }

    let password = generate_password(length);
    println!("Generated password: {}", password.cyan().bold());

    let copy = save || prompt::confirm("Copy to clipboard?")?;
    if copy {
        SystemClipboard.set_text(&password)?;
        println!("{}", "Copied to clipboard successfully!".green());
    }

    Ok(())
}

// ─── Web ─────────────────────────────────────────────────────────────────────

async fn cmd_web(port: u16) -> Result<(), AppError> {
    let service = Arc::new(open_service()?);
    println!("Starting the server at http://127.0.0.1:{} ...", port);
    crate::web::run(service, port).await
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Build the service over the default metadata location and the platform
/// keyring.
fn open_service() -> Result<CredentialService, AppError> {
    let store = MetaStore::open_default()?;
    Ok(CredentialService::new(store, Arc::new(KeyringVault::new())))
}

/// Use the given title, or prompt a selection over the existing ones.
fn resolve_title(
    service: &CredentialService,
    title: Option<String>,
) -> Result<String, AppError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => {
            let titles: Vec<String> = service
                .list_organizations(ListFilter::default())?
                .into_iter()
                .map(|org| org.title)
                .collect();
            prompt::select("Choose the organisation", &titles, false)
        }
    }
}

/// Use the given email, or prompt a selection over the organisation's
/// accounts.
fn resolve_email(
    service: &CredentialService,
    title: &str,
    email: Option<String>,
) -> Result<String, AppError> {
    match email {
        Some(e) if !e.trim().is_empty() => Ok(e),
        _ => {
            let emails: Vec<String> = service
                .get_accounts_of(title)?
                .into_iter()
                .map(|account| account.email)
                .collect();
            prompt::select("Select your email/username", &emails, false)
        }
    }
}

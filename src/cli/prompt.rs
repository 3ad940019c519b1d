// Passkeep — Interactive prompt helpers
//
// Plain stdin prompts used when positional arguments are missing: numbered
// selection over existing choices, free-text input, hidden password entry,
// and yes/no confirmation. Cancelled or empty required input becomes a
// Validation error so the process exits non-zero.

use std::io::{self, Write};

use colored::Colorize;

use crate::error::AppError;

fn read_line() -> Result<String, AppError> {
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Required free-text input.
pub fn input(message: &str) -> Result<String, AppError> {
    print!("{} ", format!("{}:", message).bold());
    io::stdout().flush()?;
    let value = read_line()?;
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", message)));
    }
    Ok(value)
}

/// Optional free-text input; empty answer becomes `None`.
pub fn input_optional(message: &str) -> Result<Option<String>, AppError> {
    print!("{} {} ", format!("{}:", message).bold(), "(optional)".yellow());
    io::stdout().flush()?;
    let value = read_line()?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Hidden password entry (never echoed, never in shell history).
pub fn secret(message: &str) -> Result<String, AppError> {
    let value = rpassword::prompt_password(format!("{}: ", message))?;
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", message)));
    }
    Ok(value)
}

/// Yes/no confirmation; anything but y/yes is a no.
pub fn confirm(message: &str) -> Result<bool, AppError> {
    print!("{} {} ", message.bold(), "(y/n)".dimmed());
    io::stdout().flush()?;
    let value = read_line()?;
    Ok(matches!(value.to_lowercase().as_str(), "y" | "yes"))
}

/// Numbered selection over existing choices. A number picks a choice, an
/// exact (case-insensitive) name matches it, and when `allow_new` is set
/// any other non-empty answer is taken as a new value.
pub fn select(message: &str, choices: &[String], allow_new: bool) -> Result<String, AppError> {
    if choices.is_empty() && !allow_new {
        return Err(AppError::Validation(format!(
            "there is nothing to choose from for '{}'",
            message
        )));
    }

    if !choices.is_empty() {
        println!("{}", format!("{}:", message).bold());
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}. {}", i + 1, choice);
        }
    }

    let hint = if allow_new {
        "number, name, or a new name"
    } else {
        "number or name"
    };
    print!("> {} ", format!("({})", hint).dimmed());
    io::stdout().flush()?;

    let raw = read_line()?;
    if raw.is_empty() {
        return Err(AppError::Validation("prompt cancelled".to_string()));
    }

    if let Ok(index) = raw.parse::<usize>() {
        if (1..=choices.len()).contains(&index) {
            return Ok(choices[index - 1].clone());
        }
    }

    if let Some(exact) = choices.iter().find(|c| c.eq_ignore_ascii_case(&raw)) {
        return Ok(exact.clone());
    }

    if allow_new {
        Ok(raw)
    } else {
        Err(AppError::Validation(format!(
            "'{}' is not one of the available choices",
            raw
        )))
    }
}

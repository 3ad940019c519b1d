// Passkeep — Library root
//
// Re-exports the store, vault, service, clipboard, web, and CLI modules.

pub mod cli;
pub mod clipboard;
pub mod error;
pub mod service;
pub mod store;
pub mod vault;
pub mod web;

pub use error::{AppError, Result};

// Passkeep — Web Module
//
// Optional local HTTP server for the companion UI. Every route invokes
// one Credential Service operation and serializes its typed result to
// JSON with the mapped status code.

mod handlers;
mod server;

pub use handlers::AppState;
pub use server::{router, run, DEFAULT_PORT};

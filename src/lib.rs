pub mod config;
pub mod document;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod routes;
pub mod utils;

use crate::mailer::Mailer;

/// Shared application state, created once at startup and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Mailer,
}

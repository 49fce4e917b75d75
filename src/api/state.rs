//! Shared application state.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::core::menu::MenuService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The menu domain service, shared with the blocking pool.
    pub service: Arc<MenuService>,
    /// Admin credential and session checks.
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(service: Arc<MenuService>, auth: Arc<AuthService>) -> Self {
        Self { service, auth }
    }
}

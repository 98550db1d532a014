//! Application state for shared services

use std::sync::Arc;

use crate::domain::UserDirectory;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectory>,
}

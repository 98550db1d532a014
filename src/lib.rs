//! Directory Gateway
//!
//! A user-directory query facade between a network-facing identity service
//! and two backing sources of truth: a Keycloak-style administrative API and
//! a denormalized relational replica of the provider's user tables. Filtered,
//! paginated list queries run against the replica; single-user reads and all
//! writes go through the administrative API. Both paths flatten the
//! provider's custom attributes (country, phone, photo) into one canonical
//! user record shape.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use api::state::AppState;
use infrastructure::directory::{DirectoryService, PostgresReplica};
use infrastructure::keycloak::KeycloakAdminClient;

/// Wire up the shared collaborators and build the application state.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let admin = KeycloakAdminClient::new(config.keycloak.clone())?;
    let directory = DirectoryService::new(PostgresReplica::new(pool), Arc::new(admin));

    Ok(AppState {
        directory: Arc::new(directory),
    })
}

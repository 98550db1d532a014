//! Keycloak administrative-API integration

mod client;
mod models;

pub use client::{AdminApi, KeycloakAdminClient};
pub use models::{AdminToken, AdminUser};

#[cfg(test)]
pub use client::MockAdminApi;

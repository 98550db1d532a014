//! Infrastructure layer - concrete implementations behind the domain traits

pub mod directory;
pub mod keycloak;
pub mod logging;

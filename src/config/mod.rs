//! Process configuration

mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, KeycloakConfig, LogFormat, LoggingConfig, ServerConfig,
};

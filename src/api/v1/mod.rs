//! Versioned API endpoints

pub mod users;

//! CLI for the directory gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// User directory gateway over a Keycloak admin API and its relational replica
#[derive(Parser)]
#[command(name = "directory-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}

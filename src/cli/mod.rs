//! CLI module for the semantic translation cache
//!
//! - `serve`: run the HTTP server
//! - `migrate`: create the pgvector extension, table and indexes

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Semantic Translation Cache - reuse translations of similar sentences
#[derive(Parser)]
#[command(name = "semantic-translation-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the translation server
    Serve,

    /// Create the cache table in Postgres and exit
    Migrate,
}

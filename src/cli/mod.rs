//! CLI interface for Blogpad

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blogpad")]
#[command(author = "Krakaw")]
#[command(version = "1.0.0")]
#[command(about = "Blog CRUD service with cookie sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default blogpad.toml into the current directory
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides [server].host)
        #[arg(long, env = "BLOGPAD_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides [server].port)
        #[arg(short, long, env = "BLOGPAD_PORT")]
        port: Option<u16>,
    },

    /// Print the effective configuration
    Config,
}

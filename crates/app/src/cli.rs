//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Storefront client core")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Locale to switch to before running the command
    #[arg(short, long)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a search against the catalog indexes
    Search {
        /// JSON query body (match-all if omitted)
        #[arg(short, long)]
        query: Option<String>,

        /// Logical indexes to search instead of the configured ones
        #[arg(short, long, value_delimiter = ',')]
        indexes: Vec<String>,
    },

    /// Resolve a storefront path to its view
    Navigate {
        /// Path to resolve, e.g. `/red-shoes`
        path: String,

        /// Treat the path as a page that needs a signed-in user
        #[arg(long)]
        protected: bool,
    },

    /// Create a customer account
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login (usually an email address)
        #[arg(long)]
        login: String,
        /// Password
        #[arg(long, env = "STOREFRONT_PASSWORD")]
        password: String,
    },

    /// Sign in
    Login {
        /// Login
        #[arg(long)]
        login: String,
        /// Password
        #[arg(long, env = "STOREFRONT_PASSWORD")]
        password: String,
    },

    /// Sign out
    Logout,

    /// Restore the saved session and show the signed-in user
    Whoami,
}

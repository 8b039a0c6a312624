//! Pantry CLI - Database migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema migrations (and create the session table)
//! pantry-cli migrate
//!
//! # List registered households
//! pantry-cli households list
//!
//! # Delete expired sessions
//! pantry-cli sessions prune
//! ```
//!
//! # Environment Variables
//!
//! - `PANTRY_DATABASE_URL` - `SQLite` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pantry-cli")]
#[command(author, version, about = "Pantry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect households
    Households {
        #[command(subcommand)]
        action: HouseholdAction,
    },
    /// Maintain the session store
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum HouseholdAction {
    /// List households with their member counts
    List,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete expired sessions
    Prune,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pool = commands::connect().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&pool).await?,
        Commands::Households { action } => match action {
            HouseholdAction::List => commands::households::list(&pool).await?,
        },
        Commands::Sessions { action } => match action {
            SessionAction::Prune => commands::sessions::prune(&pool).await?,
        },
    }
    Ok(())
}

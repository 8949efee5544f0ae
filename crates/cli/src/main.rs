//! Weezer CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! weezer-cli migrate
//!
//! # Create a user
//! weezer-cli user create -u alice -n "Alice Liddell" -p 'a long password'
//!
//! # Load demo users, posts, comments and follows
//! weezer-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `WEEZER_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "weezer-cli")]
#[command(author, version, about = "Weezer CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the database with demo data (safe to run repeatedly)
    Seed,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login handle (3-30 letters, digits or underscores)
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                name,
                password,
            } => {
                commands::user::create(username, name, password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}

//! Database migration command.
//!
//! Applies the migrations embedded from `crates/server/migrations/`.
//! Already-applied migrations are skipped.

use super::{CommandError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    weezer_server::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

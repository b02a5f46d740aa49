//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! wf-cli migrate
//! ```
//!
//! Migrations live in `crates/site/migrations/` and are embedded at compile
//! time.

use super::{CommandError, connect};

/// Run the site migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running site migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    tracing::info!("Site migrations complete!");
    Ok(())
}

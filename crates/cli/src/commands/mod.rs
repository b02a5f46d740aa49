//! CLI subcommands.
//!
//! Every command connects with `SITE_DATABASE_URL`, falling back to
//! `DATABASE_URL`, after loading `.env` if present.

pub mod migrate;
pub mod site;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use wayfarer_site::db::RepositoryError;
use wayfarer_site::services::auth::AuthError;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// User creation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, editor")]
    InvalidRole(String),
}

/// Open a pool against the site database.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("SITE_DATABASE_URL"))?;

    tracing::info!("Connecting to site database...");
    Ok(wayfarer_site::db::create_pool(&database_url).await?)
}

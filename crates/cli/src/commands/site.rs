//! Site activation.
//!
//! A deactivated site sends every anonymous visitor to the maintenance page;
//! signed-in users keep full access.
//!
//! # Usage
//!
//! ```bash
//! wf-cli site deactivate
//! wf-cli site activate
//! ```
//!
//! The running site caches the flag for `SITE_SETTINGS_CACHE_SECS`, so the
//! change can take that long to show. The admin API invalidates the cache
//! immediately.

use wayfarer_site::db::SettingsRepository;

use super::{CommandError, connect};

/// Open or close the site to anonymous visitors.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn set_active(active: bool) -> Result<(), CommandError> {
    let pool = connect().await?;

    SettingsRepository::new(&pool).set_status(active).await?;

    if active {
        tracing::info!("Site activated");
    } else {
        tracing::info!("Site deactivated, anonymous visitors now see the maintenance page");
    }
    Ok(())
}

//! Back-office user management.
//!
//! # Usage
//!
//! ```bash
//! wf-cli user create -e staff@example.com -n "Staff Name" -r editor -p '...'
//! ```
//!
//! The password may also come from `WAYFARER_USER_PASSWORD`.

use wayfarer_core::Role;
use wayfarer_site::services::auth::AuthService;

use super::{CommandError, connect};

/// Create a back-office user and return its id.
///
/// # Errors
///
/// Returns an error if the role is unknown, the email or password is
/// rejected, the email is taken, or the database is unreachable.
pub async fn create(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<i32, CommandError> {
    let role: Role = role
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))?;

    let pool = connect().await?;

    tracing::info!("Creating user: {} ({})", email, role);
    let user = AuthService::new(&pool)
        .create_user(email, name, role, password)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );

    Ok(user.id.as_i32())
}

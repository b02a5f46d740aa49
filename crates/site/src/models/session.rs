//! Session-related types.
//!
//! The session token is the only identity the access gate sees. It is stored
//! server-side by tower-sessions and decoded once per request.

use serde::{Deserialize, Serialize};

use wayfarer_core::{Email, Role, UserId};

/// Identity of the signed-in back-office user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// User's database ID.
    pub subject: UserId,
    /// User's email address.
    pub email: Email,
    /// Role claim. `None` means an authenticated visitor with no back-office role.
    pub role: Option<Role>,
}

impl SessionToken {
    /// Whether the token's role is one of `allowed`.
    #[must_use]
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.role.is_some_and(|role| allowed.contains(&role))
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the signed-in user's [`super::SessionToken`].
    pub const SESSION_TOKEN: &str = "session_token";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token(role: Option<Role>) -> SessionToken {
        SessionToken {
            subject: UserId::new(1),
            email: Email::parse("staff@wayfarer.travel").unwrap(),
            role,
        }
    }

    #[test]
    fn role_check_requires_a_listed_role() {
        assert!(token(Some(Role::Admin)).has_any_role(&[Role::Admin]));
        assert!(token(Some(Role::Editor)).has_any_role(&[Role::Admin, Role::Editor]));
        assert!(!token(Some(Role::Editor)).has_any_role(&[Role::Admin]));
        assert!(!token(None).has_any_role(&[Role::Admin, Role::Editor]));
    }
}

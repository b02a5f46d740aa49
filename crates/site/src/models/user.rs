//! Back-office user types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use wayfarer_core::{Email, Role, UserId};

/// A back-office user (admin or editor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

//! Roles and lifecycle enums for catalog and editorial entities.
//!
//! All enums serialize in `SCREAMING_SNAKE_CASE` so JSON payloads, session
//! data and the `PostgreSQL` enum labels share one spelling.

use serde::{Deserialize, Serialize};

/// Back-office role carried by a session token.
///
/// Visitors have no role at all; they are represented by the absence of a
/// token (or a token whose role is `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "site.user_role", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access, including users, package types, categories and settings.
    Admin,
    /// Package, article and slide management.
    Editor,
}

impl Role {
    /// The wire/database label for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "EDITOR" => Ok(Self::Editor),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Publication state of a travel package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "site.package_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    #[default]
    Draft,
    Active,
    Inactive,
    Unavailable,
}

impl PackageStatus {
    /// Whether the package can currently be booked.
    #[must_use]
    pub const fn is_bookable(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::str::FromStr for PackageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            _ => Err(format!("invalid package status: {s}")),
        }
    }
}

/// How prominently a package is promoted on the home page.
///
/// Ordered by prominence, matching the database enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "site.package_highlight", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageHighlight {
    #[default]
    Normal,
    Featured,
    Main,
}

impl PackageHighlight {
    /// Featured and main packages are promoted on the home page.
    #[must_use]
    pub const fn is_promoted(&self) -> bool {
        matches!(self, Self::Featured | Self::Main)
    }
}

/// Publication state of a blog article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "site.article_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" EDITOR ".parse::<Role>(), Ok(Role::Editor));
        assert!("viewer".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_in_screaming_case() {
        let json = serde_json::to_string(&Role::Editor).ok();
        assert_eq!(json.as_deref(), Some("\"EDITOR\""));
    }

    #[test]
    fn only_active_packages_are_bookable() {
        assert!(PackageStatus::Active.is_bookable());
        assert!(!PackageStatus::Draft.is_bookable());
        assert!(!PackageStatus::Inactive.is_bookable());
        assert!(!PackageStatus::Unavailable.is_bookable());
    }

    #[test]
    fn featured_and_main_are_promoted() {
        assert!(PackageHighlight::Featured.is_promoted());
        assert!(PackageHighlight::Main.is_promoted());
        assert!(!PackageHighlight::Normal.is_promoted());
    }

    #[test]
    fn package_status_parses_from_form_values() {
        assert_eq!("unavailable".parse(), Ok(PackageStatus::Unavailable));
        assert!("archived".parse::<PackageStatus>().is_err());
    }
}

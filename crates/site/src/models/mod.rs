//! Domain models for the Wayfarer site.
//!
//! Row types double as domain types: they derive `sqlx::FromRow` and are
//! read-only outside the repositories in [`crate::db`].

pub mod catalog;
pub mod session;
pub mod settings;
pub mod user;

pub use catalog::{Article, Category, HeroSlide, Package, PackageType};
pub use session::{SessionToken, keys as session_keys};
pub use settings::{SiteSettings, SmtpSettings};
pub use user::User;

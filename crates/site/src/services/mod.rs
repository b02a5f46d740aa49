//! Business logic services for the site.
//!
//! - `auth` - Back-office sign-in and password hashing
//! - `mail` - Contact inquiry email

pub mod auth;
pub mod mail;

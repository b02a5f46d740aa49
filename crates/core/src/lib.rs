//! Wayfarer Core - Shared types library.
//!
//! This crate provides common types used across all Wayfarer components:
//! - `site` - Public travel catalog, admin area and JSON API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, roles, catalog statuses, emails and prices
//! - [`slug`] - Slug generation and legacy slug normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod slug;
pub mod types;

pub use types::*;

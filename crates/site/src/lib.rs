//! Wayfarer site library.
//!
//! The site binary, the CLI and the tests all build on this crate. The policy
//! core is the request-time [`gate`] and the JSON-LD generator in [`seo`];
//! the rest is the web stack and storage around them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod filters;
pub mod gate;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod routes;
pub mod seo;
pub mod services;
pub mod state;

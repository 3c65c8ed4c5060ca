//! # Catalog Shared Library
//!
//! This crate contains shared types, persistence and authentication code used
//! by the catalog API server and the console client.
//!
//! ## Module Organization
//!
//! - `models`: Product model and the `ProductStore` persistence seam
//! - `auth`: Bearer token verification and request auth context
//! - `db`: PostgreSQL pool management and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the catalog shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

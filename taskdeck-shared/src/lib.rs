//! # TaskDeck Shared Library
//!
//! This crate contains the data stores, authentication primitives, and
//! database plumbing used by the TaskDeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their owner-scoped operations
//! - `auth`: Password hashing, Basic credential parsing, and the auth middleware
//! - `db`: Connection pool and migration runner
//! - `error`: Common store error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;

/// Current version of the TaskDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

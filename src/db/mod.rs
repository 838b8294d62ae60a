//! Database module for SQLite operations.
//!
//! This module provides:
//! - Pool setup and idempotent schema bootstrap
//! - SQLite pragma configuration
//! - Repository layer for catalog reads

pub mod repo;
pub mod schema;

pub use repo::Repository;
pub use schema::init_db;

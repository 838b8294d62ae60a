//! Repository layer for catalog reads.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by table family:
//! - `categories.rs` - Visible category lookups
//! - `products.rs` - Price and listing rows scoped to category sets
//!
//! Every identifier is bound as a query parameter; `IN` lists are expanded to
//! chunked `?` placeholders.

mod categories;
mod products;

use crate::domain::Decimal;
use sqlx::sqlite::SqlitePool;
use std::str::FromStr;
use tracing::warn;

/// SQLite has a 999 parameter limit; chunk to 500 for safety margin.
const CHUNK_SIZE: usize = 500;

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to check the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `?,?,?` for an `IN` list of `len` bound values.
fn placeholders(len: usize) -> String {
    vec!["?"; len].join(",")
}

/// Parse a stored price. Unparseable values are logged and yield `None`, so
/// callers drop the row instead of pricing it at zero.
fn parse_price(raw: &str, column: &str, row_id: i64) -> Option<Decimal> {
    match Decimal::from_str(raw) {
        Ok(price) => Some(price),
        Err(e) => {
            warn!(
                row_id,
                column,
                value = %raw,
                error = %e,
                "Failed to parse stored price decimal, skipping row"
            );
            None
        }
    }
}

//! SQLite persistence layer.
//!
//! RULE: Only store code talks to the database. The tracker, dashboard,
//! and intake go through store methods (or the provider seam) — they
//! never execute SQL directly.

use crate::error::PortalResult;
use rusqlite::Connection;

mod complaint;
mod seed;

pub use seed::REFERENCE_TOKEN;

pub struct PortalStore {
    conn: Connection,
}

impl PortalStore {
    /// Open (or create) the portal database at `path`.
    pub fn open(path: &str) -> PortalResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PortalResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PortalResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_portal.sql"))?;
        Ok(())
    }
}

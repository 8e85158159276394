use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::schema::field::UPDATED_AT;
use crate::libs::schema::Fields;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

pub const DB_FILE_NAME: &str = "todo-guard.db";
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory with all
    /// migrations applied.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let config = Config::read()?;
        Self::open_with_timeout(db_file_path, Duration::from_millis(config.busy_timeout_ms))
    }

    /// Opens the database at `path` with all migrations applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Db> {
        let mut conn = connect(path.as_ref(), busy_timeout)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Connection to the default database without running migrations.
    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open_without_migrations(db_file_path)
    }

    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        connect(path.as_ref(), DEFAULT_BUSY_TIMEOUT)
    }
}

fn connect(path: &Path, busy_timeout: Duration) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(busy_timeout)?;
    Ok(conn)
}

/// Starts a transaction holding the write lock, so the snapshot read during
/// validation cannot go stale before the write commits.
pub(crate) fn write_transaction(conn: &mut Connection) -> rusqlite::Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
}

pub(crate) fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Stamps `updatedAt` on a patch for a record last touched at `last`. Never
/// earlier than `last`, even if the clock stepped back.
pub(crate) fn stamp_update(changes: &mut Fields, last: DateTime<Utc>) -> serde_json::Result<()> {
    let at = Utc::now().max(last);
    changes.insert(UPDATED_AT.to_string(), serde_json::to_value(at)?);
    Ok(())
}

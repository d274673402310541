use super::migrations::init_with_migrations;
use crate::libs::config::DatabaseLocation;
use crate::libs::error::{Result, TaskError};
use rusqlite::Connection;
use std::time::Duration;

/// How long a writer waits on a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database and applies any pending migrations.
    pub fn open(location: &DatabaseLocation) -> Result<Db> {
        let mut conn = Self::open_without_migrations(location)?;
        init_with_migrations(&mut conn).map_err(TaskError::Migration)?;

        Ok(Db { conn })
    }

    /// Opens a bare connection. Used by migration tooling and tests.
    pub fn open_without_migrations(location: &DatabaseLocation) -> Result<Connection> {
        let conn = match location {
            DatabaseLocation::Memory => Connection::open_in_memory()?,
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                Connection::open(path)?
            }
        };
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(conn)
    }
}

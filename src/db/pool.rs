//! SQLite connection handle for the order store (lightweight for CLI usage).
//!
//! A `DbPool` is opened explicitly by the caller and passed to every
//! operation; once closed, every operation fails with `StoreUnavailable`.

use crate::db::migrate::run_pending_migrations;
use crate::db::schema::TableSchema;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    conn: Option<Connection>,
    pub schema: TableSchema,
}

/// Options applied when opening a store.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    /// Zip the database file before a destructive rebuild drops rows.
    pub backup_before_rebuild: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            backup_before_rebuild: true,
        }
    }
}

impl DbPool {
    /// Open (or create) the store at `path` with the requested schema version.
    /// A version higher than the stored one rebuilds the table from scratch.
    pub fn open(path: &str, version: i32, schema: &TableSchema) -> AppResult<Self> {
        Self::open_with(path, version, schema, OpenOptions::default())
    }

    pub fn open_with(
        path: &str,
        version: i32,
        schema: &TableSchema,
        opts: OpenOptions,
    ) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::init_with_connection(conn, version, schema, opts)
    }

    /// In-memory store (tests).
    pub fn open_in_memory(version: i32, schema: &TableSchema) -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_with_connection(conn, version, schema, OpenOptions::default())
    }

    fn init_with_connection(
        conn: Connection,
        version: i32,
        schema: &TableSchema,
        opts: OpenOptions,
    ) -> AppResult<Self> {
        run_pending_migrations(&conn, version, schema, opts)?;
        Ok(Self {
            conn: Some(conn),
            schema: schema.clone(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Connection of an open store.
    pub fn conn(&self) -> AppResult<&Connection> {
        self.conn.as_ref().ok_or(AppError::StoreUnavailable)
    }

    pub fn conn_mut(&mut self) -> AppResult<&mut Connection> {
        self.conn.as_mut().ok_or(AppError::StoreUnavailable)
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(self.conn_mut()?)
    }

    /// Close the underlying connection. Further operations fail.
    pub fn close(&mut self) -> AppResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| AppError::TransactionFailed(e))?;
        }
        Ok(())
    }
}

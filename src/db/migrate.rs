use crate::db::log::oplog;
use crate::db::pool::OpenOptions;
use crate::db::schema::TableSchema;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Schema version recorded in the database header.
pub fn stored_version(conn: &Connection) -> AppResult<i32> {
    let v: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(v)
}

fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    if !table_exists(conn, table)? {
        return Ok(0);
    }
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(n)
}

/// Path of the main database file, empty for in-memory databases.
pub fn database_path(conn: &Connection) -> String {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default()
}

fn backup_before_rebuild(db_path: &str, from: i32, to: i32) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_orders_v{}_to_v{}.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        from,
        to
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)?;
    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;
    zip.finish()?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Drop the orders table and recreate it with the configured index set.
/// Every existing row is lost.
fn rebuild_orders_table(conn: &Connection, schema: &TableSchema) -> AppResult<()> {
    conn.execute_batch(&format!(
        "BEGIN;\n{}\n{}\nCOMMIT;",
        schema.drop_sql(),
        schema.create_sql()
    ))?;
    Ok(())
}

/// Public entry point: bring the store to `version`.
///
/// - requested > stored → destructive drop-and-recreate of the orders table
/// - requested == stored → make sure table and indexes exist
/// - requested < stored → refused
pub fn run_pending_migrations(
    conn: &Connection,
    version: i32,
    schema: &TableSchema,
    opts: OpenOptions,
) -> AppResult<()> {
    ensure_log_table(conn)?;

    let stored = stored_version(conn)?;

    if version < stored {
        return Err(AppError::Migration(format!(
            "requested schema version {} is lower than stored version {}",
            version, stored
        )));
    }

    if version == stored {
        conn.execute_batch(&schema.create_sql())?;
        return Ok(());
    }

    let rows = count_rows(conn, schema.table)?;

    if rows > 0 {
        warning(format!(
            "Schema upgrade v{} → v{}: table '{}' will be rebuilt, {} existing record(s) will be lost.",
            stored, version, schema.table, rows
        ));

        let db_path = database_path(conn);
        if opts.backup_before_rebuild && !db_path.is_empty() {
            backup_before_rebuild(&db_path, stored, version)?;
        }
    }

    rebuild_orders_table(conn, schema)?;
    conn.pragma_update(None, "user_version", version)?;

    if rows > 0 || stored > 0 {
        let message = format!("Rebuilt {} at schema v{} (dropped {} rows)", schema.table, version, rows);
        if let Err(e) = oplog(conn, "rebuild", schema.table, &message) {
            warning(format!("Failed to write internal log: {}", e));
        }
        success(message);
    }

    Ok(())
}

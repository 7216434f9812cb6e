use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// One row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn oplog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Load the log table, newest first.
pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT date, operation, IFNULL(target, ''), message FROM log ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            date: row.get(0)?,
            operation: row.get(1)?,
            target: row.get(2)?,
            message: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::db::schema::{SCHEMA_VERSION, TableSchema};

    #[test]
    fn oplog_entries_come_back_newest_first() {
        let pool = DbPool::open_in_memory(SCHEMA_VERSION, &TableSchema::default()).unwrap();
        let conn = pool.conn().unwrap();

        oplog(conn, "save", "a1", "Order saved").unwrap();
        oplog(conn, "delete", "a1", "Order deleted").unwrap();

        let entries = load_log(conn).unwrap();
        let ops: Vec<_> = entries
            .iter()
            .filter(|e| e.target == "a1")
            .map(|e| e.operation.as_str())
            .collect();
        assert_eq!(ops, vec!["delete", "save"]);
    }
}

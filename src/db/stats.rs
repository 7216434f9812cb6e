use crate::db::migrate::stored_version;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let conn = pool.conn()?;
    let table = pool.schema.table;
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Schema version:{} {}",
        CYAN,
        RESET,
        stored_version(conn)?
    );

    //
    // 2) TOTAL ORDERS
    //
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    println!(
        "{}• Total orders:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) CREATION RANGE
    //
    let first: Option<String> = conn
        .query_row(
            &format!("SELECT MIN(created_at) FROM {table} WHERE created_at IS NOT NULL"),
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let last: Option<String> = conn
        .query_row(
            &format!("SELECT MAX(created_at) FROM {table} WHERE created_at IS NOT NULL"),
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Created between:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}

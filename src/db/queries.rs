use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::order::into_slots;
use crate::models::{Executor, OrderField, OrderRecord};
use crate::utils::time::now_iso;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<OrderRecord> {
    let executors_json: String = row.get("executors")?;
    let executors: Vec<Executor> = serde_json::from_str(&executors_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(OrderRecord {
        id: row.get("id")?,
        order_number: row.get("order_number")?,
        date: row.get("date")?,
        diameter: row.get("diameter")?,
        thickness: row.get("thickness")?,
        type_size: row.get("type_size")?,
        cutting: row.get("cutting")?,
        bottom_number: row.get("bottom_number")?,
        material: row.get("material")?,
        heat_treatment: row.get("heat_treatment")?,
        treatment_date: row.get("treatment_date")?,
        executors: into_slots(executors),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn executors_to_json(rec: &OrderRecord) -> AppResult<String> {
    Ok(serde_json::to_string(&rec.executors)?)
}

pub fn get_order(pool: &DbPool, id: &str) -> AppResult<Option<OrderRecord>> {
    let conn = pool.conn()?;
    let sql = format!("SELECT * FROM {} WHERE id = ?1", pool.schema.table);
    let rec = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(rec)
}

/// Upsert keyed by id, returning the id.
///
/// `updatedAt` is always set to now. `createdAt` keeps the stored value when
/// the row already has one; otherwise the record's own value or now.
pub fn put_order(pool: &DbPool, rec: &OrderRecord) -> AppResult<String> {
    let conn = pool.conn()?;
    let now = now_iso();
    let created_at = rec.created_at.clone().unwrap_or_else(|| now.clone());

    let sql = format!(
        "INSERT INTO {t} (id, order_number, date, diameter, thickness, type_size, cutting,
                          bottom_number, material, heat_treatment, treatment_date,
                          executors, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
         ON CONFLICT(id) DO UPDATE SET
             order_number   = excluded.order_number,
             date           = excluded.date,
             diameter       = excluded.diameter,
             thickness      = excluded.thickness,
             type_size      = excluded.type_size,
             cutting        = excluded.cutting,
             bottom_number  = excluded.bottom_number,
             material       = excluded.material,
             heat_treatment = excluded.heat_treatment,
             treatment_date = excluded.treatment_date,
             executors      = excluded.executors,
             created_at     = COALESCE({t}.created_at, excluded.created_at),
             updated_at     = excluded.updated_at",
        t = pool.schema.table
    );

    conn.execute(
        &sql,
        params![
            rec.id,
            rec.order_number,
            rec.date,
            rec.diameter,
            rec.thickness,
            rec.type_size,
            rec.cutting,
            rec.bottom_number,
            rec.material,
            rec.heat_treatment,
            rec.treatment_date,
            executors_to_json(rec)?,
            created_at,
            now,
        ],
    )?;

    Ok(rec.id.clone())
}

/// Write a record exactly as given (restore path, no stamping).
pub fn insert_verbatim(conn: &Connection, table: &str, rec: &OrderRecord) -> AppResult<()> {
    let sql = format!(
        "INSERT OR REPLACE INTO {table} (id, order_number, date, diameter, thickness, type_size,
                                         cutting, bottom_number, material, heat_treatment,
                                         treatment_date, executors, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
    );

    conn.execute(
        &sql,
        params![
            rec.id,
            rec.order_number,
            rec.date,
            rec.diameter,
            rec.thickness,
            rec.type_size,
            rec.cutting,
            rec.bottom_number,
            rec.material,
            rec.heat_treatment,
            rec.treatment_date,
            executors_to_json(rec)?,
            rec.created_at,
            rec.updated_at,
        ],
    )?;
    Ok(())
}

/// Delete by id: `true` when a row was removed, `false` when absent.
pub fn delete_order(pool: &DbPool, id: &str) -> AppResult<bool> {
    let conn = pool.conn()?;
    let sql = format!("DELETE FROM {} WHERE id = ?1", pool.schema.table);
    let n = conn.execute(&sql, [id])?;
    Ok(n > 0)
}

/// All records, in primary-key order (callers must not rely on it).
pub fn list_orders(pool: &DbPool) -> AppResult<Vec<OrderRecord>> {
    let conn = pool.conn()?;
    let mut stmt = conn.prepare(&format!("SELECT * FROM {} ORDER BY id ASC", pool.schema.table))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Equality lookup over an indexed field. No ranges, no partial matches.
pub fn find_by_index(pool: &DbPool, field: OrderField, value: &str) -> AppResult<Vec<OrderRecord>> {
    if !pool.schema.has_index(field) {
        return Err(AppError::NotFound(format!("index '{}'", field.name())));
    }

    let conn = pool.conn()?;
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?1 ORDER BY id ASC",
        pool.schema.table,
        field.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([value], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_orders(pool: &DbPool) -> AppResult<i64> {
    let conn = pool.conn()?;
    let n: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", pool.schema.table),
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Remove every record, returning how many were deleted.
pub fn clear_orders(pool: &DbPool) -> AppResult<usize> {
    let conn = pool.conn()?;
    let n = conn.execute(&format!("DELETE FROM {}", pool.schema.table), [])?;
    Ok(n)
}

/// Replace the whole table with `records` inside one transaction.
///
/// Returns the number of rows stored. Records sharing an id collapse into
/// the last one, so this can be lower than `records.len()`.
pub fn restore_orders(pool: &mut DbPool, records: &[OrderRecord]) -> AppResult<usize> {
    let table = pool.schema.table;
    pool.with_conn(|conn| {
        let tx = conn.transaction()?;
        tx.execute(&format!("DELETE FROM {table}"), [])?;
        for rec in records {
            insert_verbatim(&tx, table, rec)?;
        }
        let stored: i64 =
            tx.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        tx.commit()?;
        Ok(stored as usize)
    })
}

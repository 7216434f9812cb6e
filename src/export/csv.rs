use crate::core::import::ImportRow;
use crate::errors::AppResult;
use crate::export::model::{CSV_HEADERS, H_DATE, H_ORDER_NUMBER, order_to_row};
use crate::models::OrderRecord;
use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use std::io;
use std::path::Path;

/// Write the orders with the fixed 25-column header.
/// Fields containing `,`, `"` or a newline are quoted, inner quotes doubled.
pub fn write_csv<W: io::Write>(out: W, orders: &[OrderRecord]) -> AppResult<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(CSV_HEADERS)?;

    for o in orders {
        wtr.write_record(order_to_row(o))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, orders: &[OrderRecord]) -> AppResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, orders)
}

/// Parse CSV content into import rows.
///
/// - header names are trimmed and lower-cased, column order is free
/// - rows whose field count differs from the header are dropped
/// - rows without both order number and order date are dropped
pub fn parse_csv(content: &str) -> AppResult<Vec<ImportRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = rdr.records();

    let headers: Vec<String> = match records.next() {
        Some(first) => first?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let order_key = H_ORDER_NUMBER.to_lowercase();
    let date_key = H_DATE.to_lowercase();

    let mut rows = Vec::new();
    for rec in records {
        let rec = rec?;
        if rec.len() != headers.len() {
            continue;
        }

        let row: ImportRow = headers
            .iter()
            .cloned()
            .zip(rec.iter().map(|v| v.trim().to_string()))
            .collect();

        let present = |k: &str| row.get(k).is_some_and(|v| !v.is_empty());
        if present(&order_key) && present(&date_key) {
            rows.push(row);
        }
    }

    Ok(rows)
}

pub fn read_csv_file(path: &Path) -> AppResult<Vec<ImportRow>> {
    let content = std::fs::read_to_string(path)?;
    parse_csv(&content)
}

use crate::core::query::{SortDirection, sort_records};
use crate::db::pool::DbPool;
use crate::db::queries::list_orders;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json::BackupFile;
use crate::export::{ExportFormat, csv, notify_export_success};
use crate::models::OrderField;
use crate::ui::messages::{info, warning};
use crate::utils::path::is_absolute;
use std::fs;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export every order, newest first.
    ///
    /// - `format`: csv (25-column sheet) or json (backup document)
    /// - `file`: absolute path of the output file
    ///
    /// Returns the number of exported records.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }
        let path = Path::new(file);

        let mut orders = list_orders(pool)?;

        if orders.is_empty() {
            warning("No orders in the store. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        sort_records(&mut orders, OrderField::CreatedAt, SortDirection::Desc);
        let count = orders.len();

        match format {
            ExportFormat::Csv => {
                info(format!("Exporting to CSV: {}", path.display()));
                csv::write_csv_file(path, &orders)?;
                notify_export_success("CSV", path);
            }
            ExportFormat::Json => {
                info(format!("Exporting to JSON: {}", path.display()));
                let doc = BackupFile::new(orders);
                fs::write(path, doc.to_pretty_json()?)?;
                notify_export_success("JSON", path);
            }
        }

        Ok(count)
    }
}

// src/export/mod.rs

pub mod csv;
pub(crate) mod fs_utils;
pub mod json;
pub mod logic;
pub mod model;

pub use json::BackupFile;
pub use logic::ExportLogic;

use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{date_part, now_iso};
use clap::ValueEnum;
use std::path::Path;

/// Common helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// `<cwd>/<prefix>_<YYYY-MM-DD>.<ext>`, used when no `--file` is given.
pub fn default_output_path(prefix: &str, ext: &str) -> AppResult<String> {
    let now = now_iso();
    let name = format!("{}_{}.{}", prefix, date_part(&now), ext);
    Ok(std::env::current_dir()?
        .join(name)
        .to_string_lossy()
        .to_string())
}

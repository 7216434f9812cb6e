use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::list_orders;
use crate::errors::{AppError, AppResult};
use crate::export::BackupFile;
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write a JSON backup of every order to `dest_file`, optionally zipped.
    /// Returns the path of the file actually written.
    pub fn backup(pool: &DbPool, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        // 1️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        // 2️⃣ Overwrite guard
        ensure_writable(&final_target, force)?;

        // 3️⃣ Serialize snapshot
        let doc = BackupFile::new(list_orders(pool)?);
        let json = doc.to_pretty_json()?;

        // 4️⃣ Write (plain or compressed)
        let final_path = if compress {
            compress_backup(dest, json.as_bytes())?
        } else {
            fs::write(dest, json)?;
            dest.to_path_buf()
        };

        success(format!(
            "Backup created: {} ({} records)",
            final_path.display(),
            doc.total_records
        ));

        // 5️⃣ Log in DB
        if let Err(e) = oplog(
            pool.conn()?,
            "backup",
            &final_path.to_string_lossy(),
            &format!("Backup of {} records", doc.total_records),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(final_path)
    }

    /// Read a backup document from a `.json` file or a `.zip` produced by
    /// `backup --compress`.
    pub fn load(path: &Path) -> AppResult<BackupFile> {
        let is_zip = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

        let content = if is_zip {
            info(format!("Reading compressed backup: {}", path.display()));
            let file = fs::File::open(path)?;
            let mut archive = ZipArchive::new(file)?;
            if archive.len() == 0 {
                return Err(AppError::InvalidBackup("empty archive".to_string()));
            }
            let mut entry = archive.by_index(0)?;
            let mut s = String::new();
            entry.read_to_string(&mut s)?;
            s
        } else {
            fs::read_to_string(path)?
        };

        BackupFile::from_json(&content)
    }
}

/// Store `json` inside a zip next to `path` (same stem, `.zip` extension).
fn compress_backup(path: &Path, json: &[u8]) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .with_extension("json")
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "orders_backup.json".to_string());

    zip.start_file(entry_name, options)?;
    zip.write_all(json)?;
    zip.finish()?;

    info(format!("📦 Compressed: {}", zip_path.display()));

    Ok(zip_path)
}

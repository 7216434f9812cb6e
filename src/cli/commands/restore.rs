use crate::cli::commands::send_to_primary;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::sync::{Reply, Request};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore { file, yes } = cmd {
        let doc = BackupLogic::load(Path::new(file))?;

        info(format!(
            "Backup from {} with {} record(s)",
            doc.timestamp,
            doc.data.len()
        ));

        if !*yes
            && !confirm("Every current order will be replaced by the backup. This action is irreversible.")
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let request = Request::RestoreBackup { records: doc.data };

        match send_to_primary(cfg, request)? {
            Reply::Restored { count } => success(format!("Restored {} order(s).", count)),
            other => {
                return Err(AppError::Other(format!("unexpected reply: {:?}", other)));
            }
        }
    }

    Ok(())
}

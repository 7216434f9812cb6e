use crate::cli::commands::send_to_primary;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::{Reply, Request};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        if !*yes && !confirm("Delete ALL orders? This action is irreversible.") {
            info("Operation cancelled.");
            return Ok(());
        }

        match send_to_primary(cfg, Request::ClearAllData)? {
            Reply::Cleared { count } => success(format!("Cleared {} order(s).", count)),
            other => {
                return Err(AppError::Other(format!("unexpected reply: {:?}", other)));
            }
        }
    }

    Ok(())
}

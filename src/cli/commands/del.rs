use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        //
        // Confirmation prompt
        //
        if !*yes && !confirm(&format!("Delete order {}? This action is irreversible.", id)) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let mut core = open_core(cfg)?;
        let result = DeleteLogic::apply(&core, id);
        core.close()?;
        result?;

        success(format!("Order {} has been deleted.", id));
    }

    Ok(())
}

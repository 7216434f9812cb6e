use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::export::default_output_path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let file = match file {
            Some(f) => f.clone(),
            None => default_output_path("orders_backup", "json")?,
        };

        let mut core = open_core(cfg)?;
        let result = BackupLogic::backup(core.pool(), &file, *compress, *force);
        core.close()?;
        result?;
    }

    Ok(())
}

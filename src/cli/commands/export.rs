use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, default_output_path};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let file = match file {
            Some(f) => f.clone(),
            None => default_output_path("orders_export", format.as_str())?,
        };

        let mut core = open_core(cfg)?;
        let result = ExportLogic::export(core.pool(), *format, &file, *force);
        core.close()?;
        result?;
    }
    Ok(())
}

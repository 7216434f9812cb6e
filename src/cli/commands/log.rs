use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut core = open_core(cfg)?;
        let entries = load_log(core.pool().conn()?)?;
        core.close()?;

        if entries.is_empty() {
            info("The log is empty.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Date"),
            Column::new("Operation"),
            Column::new("Target"),
            Column::new("Message"),
        ]);
        for e in entries {
            table.add_row(vec![e.date, e.operation, e.target, e.message]);
        }
        print!("{}", table.render());
    }

    Ok(())
}

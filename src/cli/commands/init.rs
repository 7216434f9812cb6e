use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database at the current schema version
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    info("Initializing rOrders…");
    info(format!("Config file : {}", Config::config_file().display()));
    info(format!("Database    : {}", db_path));

    let mut core = Core::init(&db_path, cfg.open_options())?;

    if let Err(e) = log::oplog(
        core.pool().conn()?,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    core.close()?;

    success(format!("Database initialized at {}", db_path));
    Ok(())
}

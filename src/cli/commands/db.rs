use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::stored_version;
use crate::db::pool::DbPool;
use crate::db::schema::{SCHEMA_VERSION, TableSchema};
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        if !(*migrate || *check || *vacuum || *info) {
            return Ok(());
        }

        //
        // 1) MIGRATE
        //
        // Opening at the current version is what brings the schema up to date.
        if *migrate {
            println!("{}▶ Bringing schema to version {}…{}", CYAN, SCHEMA_VERSION, RESET);
        }

        let mut pool = DbPool::open_with(
            &cfg.database,
            SCHEMA_VERSION,
            &TableSchema::default(),
            cfg.open_options(),
        )?;

        if *migrate {
            let v = stored_version(pool.conn()?)?;
            println!("{}✔ Schema at version {}.{}\n", GREEN, v, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String =
                pool.conn()?
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn()?.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        pool.close()?;
    }

    Ok(())
}

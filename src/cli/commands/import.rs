use crate::cli::commands::send_to_primary;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::MatchField;
use crate::core::sync::{Reply, Request};
use crate::errors::{AppError, AppResult};
use crate::export::csv::read_csv_file;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        by_bottom,
        overwrite,
    } = cmd
    {
        let rows = read_csv_file(Path::new(file))?;
        if rows.is_empty() {
            warning(format!("No importable rows in {}", file));
            return Ok(());
        }

        let match_field = if *by_bottom {
            MatchField::BottomNumber
        } else {
            cfg.import_match_field
        };

        info(format!(
            "Importing {} row(s), matching on \"{}\"{}",
            rows.len(),
            match_field.header(),
            if *overwrite { ", overwrite on" } else { "" }
        ));

        let request = Request::ImportOrders {
            rows,
            overwrite: *overwrite,
            match_field,
        };

        match send_to_primary(cfg, request)? {
            Reply::Imported(s) => {
                success(format!(
                    "Import completed: {} created, {} updated, {} skipped, {} errored",
                    s.created, s.updated, s.skipped, s.errored
                ));
            }
            other => {
                return Err(AppError::Other(format!("unexpected reply: {:?}", other)));
            }
        }
    }

    Ok(())
}

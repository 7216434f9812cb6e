use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{ExecutorRole, OrderField, OrderRecord};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET, colorize_optional};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let mut core = open_core(cfg)?;
        let record = core.load_by_id(id);
        core.close()?;

        let record = record?.ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;
        print_record(&record);
    }

    Ok(())
}

fn print_record(rec: &OrderRecord) {
    header(format!("Order {}", rec.order_number.as_deref().unwrap_or(&rec.id)));
    for field in OrderField::ALL {
        println!(
            "{}{:<16}{} {}",
            CYAN,
            field.name(),
            RESET,
            colorize_optional(field.value(rec).unwrap_or_default())
        );
    }

    println!("{}executors{}", CYAN, RESET);
    for role in ExecutorRole::ALL {
        let ex = rec.executor(role);
        println!(
            "  {:<12} {} {}",
            role.label(),
            colorize_optional(&ex.name),
            colorize_optional(&ex.date)
        );
    }
    println!();
}

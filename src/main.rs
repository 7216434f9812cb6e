//! rOrders main entrypoint.

use rorders::errors::AppError;
use rorders::run;
use rorders::ui::messages::{error, info};

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        if matches!(e, AppError::StoreUnavailable | AppError::Migration(_)) {
            info("The order store could not be opened. Try `rorders init` or `rorders db --check`.");
        }
        std::process::exit(1);
    }
}

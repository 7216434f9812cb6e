use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::{SortDirection, sort_records};
use crate::core::sync::{ListView, Primary, Reply, SyncBus};
use crate::errors::AppResult;
use crate::models::{OrderField, OrderRecord};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};
use std::collections::HashSet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        sort,
        dir,
        search,
        field,
        filter,
        delete,
    } = cmd
    {
        //
        // 1. Resolve sort (CLI args override config defaults)
        //
        let (default_field, default_dir) = cfg.default_sort()?;
        let sort_field = match sort {
            Some(s) => OrderField::parse(s)?,
            None => default_field,
        };
        let direction = match dir {
            Some(d) => d.parse::<SortDirection>()?,
            None => default_dir,
        };

        //
        // 2. Load snapshot (all orders, or an exact-match search)
        //
        let mut core = open_core(cfg)?;
        let snapshot = match search {
            Some(term) => {
                let search_field = match field {
                    Some(f) => OrderField::parse(f)?,
                    None => OrderField::OrderNumber,
                };
                core.search_exact(term, search_field).map(|mut found| {
                    sort_records(&mut found, sort_field, direction);
                    found
                })
            }
            None => core.list_sorted(sort_field, direction),
        };
        // Ids that exist before the primary sees the deletions; a delete of
        // any other id is acknowledged but removes nothing.
        let mut present = HashSet::new();
        for id in delete {
            if core.load_by_id(id)?.is_some() {
                present.insert(id.as_str());
            }
        }
        core.close()?;
        let snapshot = snapshot?;

        //
        // 3. Deletions go through the primary context; the view prunes
        //    its snapshot without reloading.
        //
        let bus = SyncBus::new();
        let mut view = ListView::new(bus.connect(), snapshot);

        if !delete.is_empty() {
            let primary = Primary::new(&cfg.database, cfg.open_options());
            let mut posted = HashSet::new();
            for id in delete.iter().filter(|id| posted.insert(id.as_str())) {
                view.request_delete(id)?;
            }
            bus.pump(&primary);

            let mut removed = 0;
            let mut unknown = Vec::new();
            for reply in view.sync() {
                if let Reply::OrderDeleted { id } = reply {
                    if present.contains(id.as_str()) {
                        removed += 1;
                    } else {
                        unknown.push(id);
                    }
                }
            }

            if removed > 0 {
                success(format!("Deleted {} order(s).", removed));
            }
            if !unknown.is_empty() {
                warning(format!("No order with id: {}", unknown.join(", ")));
            }
            if let Some(e) = view.last_error() {
                warning(format!("Delete failed: {}", e));
            }
        }

        //
        // 4. Render
        //
        let rows = match filter {
            Some(term) => view.filtered(term),
            None => view.records().iter().collect(),
        };

        if rows.is_empty() {
            info("No orders to show.");
            return Ok(());
        }

        print_orders(&rows);
        println!("\n{} order(s)", rows.len());
    }
    Ok(())
}

fn print_orders(rows: &[&OrderRecord]) {
    let fields = [
        OrderField::Id,
        OrderField::OrderNumber,
        OrderField::Date,
        OrderField::BottomNumber,
        OrderField::Material,
        OrderField::Diameter,
        OrderField::Thickness,
        OrderField::CreatedAt,
    ];

    let mut table = Table::new(fields.iter().map(|f| Column::new(f.name())).collect());
    for rec in rows {
        table.add_row(
            fields
                .iter()
                .map(|f| match f.value(rec) {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => "--".to_string(),
                })
                .collect(),
        );
    }

    print!("{}", table.render());
}

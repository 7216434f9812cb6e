use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rOrders
/// CLI application to keep a production order book in SQLite
#[derive(Parser)]
#[command(
    name = "rorders",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple order book CLI: record production orders, import/export CSV and JSON, back up and restore",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (schema version, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Bring the schema to the current version")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a new order or update an existing one
    Add {
        /// Edit the order with this id instead of creating a new one
        #[arg(long = "id", conflicts_with = "query")]
        id: Option<String>,

        /// Navigation query carrying the id, e.g. `index.html?id=<id>`
        #[arg(long = "query")]
        query: Option<String>,

        #[arg(long = "number", help = "Order number (letters, digits, hyphens)")]
        order_number: Option<String>,

        #[arg(long = "date", help = "Order date (defaults to today for new orders)")]
        date: Option<String>,

        #[arg(long)]
        diameter: Option<String>,

        #[arg(long)]
        thickness: Option<String>,

        #[arg(long = "type-size")]
        type_size: Option<String>,

        #[arg(long)]
        cutting: Option<String>,

        #[arg(long = "bottom")]
        bottom_number: Option<String>,

        #[arg(long)]
        material: Option<String>,

        #[arg(long = "heat-treatment")]
        heat_treatment: Option<String>,

        #[arg(long = "treatment-date")]
        treatment_date: Option<String>,

        /// Executor slot, repeatable: ROLE=NAME[@DATE]
        /// (roles: welder, stamping, flanging, calibration, plug-welder, cutter)
        #[arg(long = "executor", value_name = "ROLE=NAME[@DATE]")]
        executors: Vec<String>,
    },

    /// Show one order
    Show {
        id: String,
    },

    /// Delete an order by id
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List orders
    List {
        #[arg(long, value_name = "FIELD", help = "Sort field (e.g. createdAt, orderNumber)")]
        sort: Option<String>,

        #[arg(long, value_name = "asc|desc", help = "Sort direction")]
        dir: Option<String>,

        #[arg(
            long,
            value_name = "TERM",
            help = "Exact match on --field (default: orderNumber)"
        )]
        search: Option<String>,

        #[arg(long, value_name = "FIELD", requires = "search")]
        field: Option<String>,

        #[arg(
            long,
            value_name = "TERM",
            help = "Substring filter on order number or bottom number"
        )]
        filter: Option<String>,

        #[arg(long, value_name = "ID", help = "Delete these orders from the list")]
        delete: Vec<String>,
    },

    /// Export every order
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Absolute output path (default: ./orders_export_<date>.<ext>)"
        )]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import orders from a CSV sheet
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "by-bottom", help = "Match existing orders by bottom number")]
        by_bottom: bool,

        #[arg(long, help = "Update matched orders instead of skipping them")]
        overwrite: bool,
    },

    /// Create a JSON backup of every order
    Backup {
        #[arg(
            long,
            value_name = "FILE",
            help = "Output path (default: ./orders_backup_<date>.json)"
        )]
        file: Option<String>,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace every order with the content of a backup
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Delete every order
    Clear {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

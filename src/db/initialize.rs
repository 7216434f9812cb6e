use crate::db::pool::{DbPool, OpenOptions};
use crate::db::schema::{SCHEMA_VERSION, TableSchema};
use crate::errors::AppResult;

/// Open the order store at the current schema version.
/// All schema creation / upgrades are delegated to the migration engine.
pub fn init_db(db_path: &str, opts: OpenOptions) -> AppResult<DbPool> {
    DbPool::open_with(db_path, SCHEMA_VERSION, &TableSchema::default(), opts)
}

//! Operation contract consumed by the presentation layer (CLI).

use crate::core::import::{ImportLogic, ImportRow, ImportSummary, MatchField};
use crate::core::query::{SortDirection, search, sort_records};
use crate::db::log::oplog;
use crate::db::initialize::init_db;
use crate::db::pool::{DbPool, OpenOptions};
use crate::db::queries::{clear_orders, delete_order, get_order, list_orders, put_order, restore_orders};
use crate::errors::AppResult;
use crate::models::{OrderField, OrderRecord};
use crate::ui::messages::warning;

/// Order store facade. The caller owns it and decides when it is opened
/// and closed; after `close` every operation fails with `StoreUnavailable`.
pub struct Core {
    pool: DbPool,
}

impl Core {
    /// Open the store at `db_path` (current schema version).
    pub fn init(db_path: &str, opts: OpenOptions) -> AppResult<Self> {
        Ok(Self {
            pool: init_db(db_path, opts)?,
        })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn close(&mut self) -> AppResult<()> {
        self.pool.close()
    }

    fn log(&self, operation: &str, target: &str, message: &str) {
        let res = self
            .pool
            .conn()
            .and_then(|conn| oplog(conn, operation, target, message));
        if let Err(e) = res {
            warning(format!("Failed to write internal log: {}", e));
        }
    }

    pub fn load_by_id(&self, id: &str) -> AppResult<Option<OrderRecord>> {
        get_order(&self.pool, id)
    }

    /// Upsert; the store stamps `updatedAt` and keeps an existing `createdAt`.
    pub fn save(&self, record: &OrderRecord) -> AppResult<String> {
        let id = put_order(&self.pool, record)?;
        self.log(
            "save",
            &id,
            record.order_number.as_deref().unwrap_or_default(),
        );
        Ok(id)
    }

    /// `true` when a record was removed, `false` when the id was unknown.
    pub fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let removed = delete_order(&self.pool, id)?;
        if removed {
            self.log("delete", id, "Order deleted");
        }
        Ok(removed)
    }

    pub fn list_sorted(&self, field: OrderField, dir: SortDirection) -> AppResult<Vec<OrderRecord>> {
        let mut records = list_orders(&self.pool)?;
        sort_records(&mut records, field, dir);
        Ok(records)
    }

    pub fn search_exact(&self, term: &str, field: OrderField) -> AppResult<Vec<OrderRecord>> {
        search(&self.pool, term, field)
    }

    pub fn import_batch(
        &self,
        rows: &[ImportRow],
        match_field: MatchField,
        overwrite: bool,
    ) -> AppResult<ImportSummary> {
        // Fail the whole batch up front when the store is closed.
        self.pool.conn()?;
        let s = ImportLogic::run(&self.pool, rows, match_field, overwrite);
        self.log(
            "import",
            "",
            &format!(
                "created={} updated={} skipped={} errored={}",
                s.created, s.updated, s.skipped, s.errored
            ),
        );
        Ok(s)
    }

    /// Replace every record with `records` (irreversible).
    pub fn restore_all(&mut self, records: &[OrderRecord]) -> AppResult<usize> {
        let n = restore_orders(&mut self.pool, records)?;
        self.log("restore", "", &format!("Restored {n} records"));
        Ok(n)
    }

    /// Remove every record (irreversible).
    pub fn clear_all(&self) -> AppResult<usize> {
        let n = clear_orders(&self.pool)?;
        self.log("clear", "", &format!("Cleared {n} records"));
        Ok(n)
    }
}

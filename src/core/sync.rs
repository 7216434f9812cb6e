//! Cross-context sync protocol.
//!
//! Secondary contexts (list view, admin console) never touch the store. They
//! post a typed [`Request`] through the [`SyncBus`] and receive exactly one
//! [`Reply`] per request: an acknowledgement or an `Error`. The primary never
//! pushes unsolicited messages; secondaries hold snapshots and stay
//! consistent only through these replies.
//!
//! The bus owns the primary's inbox only. Each envelope carries a reply
//! `Sender`, so neither side owns the other: dropping a secondary simply
//! makes its replies undeliverable.

use crate::core::import::{ImportLogic, ImportRow, ImportSummary, MatchField};
use crate::core::query::filter_snapshot;
use crate::db::log::oplog;
use crate::db::pool::{DbPool, OpenOptions};
use crate::db::queries::{clear_orders, delete_order, restore_orders};
use crate::db::schema::{SCHEMA_VERSION, TableSchema};
use crate::errors::{AppError, AppResult};
use crate::models::OrderRecord;
use crate::ui::messages::warning;
use std::sync::mpsc::{self, Receiver, Sender};

/// Secondary → primary.
#[derive(Debug, Clone)]
pub enum Request {
    DeleteOrder {
        id: String,
    },
    ImportOrders {
        rows: Vec<ImportRow>,
        overwrite: bool,
        match_field: MatchField,
    },
    RestoreBackup {
        records: Vec<OrderRecord>,
    },
    ClearAllData,
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::DeleteOrder { .. } => "DELETE_ORDER",
            Request::ImportOrders { .. } => "IMPORT_ORDERS",
            Request::RestoreBackup { .. } => "RESTORE_BACKUP",
            Request::ClearAllData => "CLEAR_ALL_DATA",
        }
    }
}

/// Primary → secondary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    OrderDeleted { id: String },
    Imported(ImportSummary),
    Restored { count: usize },
    Cleared { count: usize },
    Error { message: String },
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}

struct Envelope {
    request: Request,
    reply_to: Sender<Reply>,
}

/// The primary context: the only writer of the store.
#[derive(Debug, Clone)]
pub struct Primary {
    db_path: String,
    version: i32,
    schema: TableSchema,
    opts: OpenOptions,
}

impl Primary {
    pub fn new(db_path: &str, opts: OpenOptions) -> Self {
        Self {
            db_path: db_path.to_string(),
            version: SCHEMA_VERSION,
            schema: TableSchema::default(),
            opts,
        }
    }

    /// Handle one request on a freshly opened store; failures become
    /// `Reply::Error` carrying the error text.
    pub fn handle(&self, request: Request) -> Reply {
        let kind = request.kind();
        match self.execute(request) {
            Ok(reply) => reply,
            Err(e) => {
                warning(format!("{} failed: {}", kind, e));
                Reply::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    fn execute(&self, request: Request) -> AppResult<Reply> {
        let mut pool = DbPool::open_with(&self.db_path, self.version, &self.schema, self.opts)?;

        let (reply, target, message) = match request {
            Request::DeleteOrder { id } => {
                let removed = delete_order(&pool, &id)?;
                let message = if removed {
                    "Order deleted".to_string()
                } else {
                    "Order not present".to_string()
                };
                (Reply::OrderDeleted { id: id.clone() }, id, message)
            }
            Request::ImportOrders {
                rows,
                overwrite,
                match_field,
            } => {
                let s = ImportLogic::run(&pool, &rows, match_field, overwrite);
                let message = format!(
                    "created={} updated={} skipped={} errored={}",
                    s.created, s.updated, s.skipped, s.errored
                );
                (Reply::Imported(s), String::new(), message)
            }
            Request::RestoreBackup { records } => {
                let count = restore_orders(&mut pool, &records)?;
                (
                    Reply::Restored { count },
                    String::new(),
                    format!("Restored {count} records"),
                )
            }
            Request::ClearAllData => {
                let count = clear_orders(&pool)?;
                (
                    Reply::Cleared { count },
                    String::new(),
                    format!("Cleared {count} records"),
                )
            }
        };

        let operation = match &reply {
            Reply::OrderDeleted { .. } => "delete",
            Reply::Imported(_) => "import",
            Reply::Restored { .. } => "restore",
            Reply::Cleared { .. } => "clear",
            Reply::Error { .. } => "error",
        };
        if let Err(e) = oplog(pool.conn()?, operation, &target, &message) {
            warning(format!("Failed to write internal log: {}", e));
        }

        pool.close()?;
        Ok(reply)
    }
}

/// Mediator between the primary and any number of secondaries.
pub struct SyncBus {
    inbox_tx: Sender<Envelope>,
    inbox_rx: Receiver<Envelope>,
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncBus {
    pub fn new() -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        Self { inbox_tx, inbox_rx }
    }

    /// Register a secondary context.
    pub fn connect(&self) -> SecondaryHandle {
        let (reply_tx, replies) = mpsc::channel();
        SecondaryHandle {
            outbox: self.inbox_tx.clone(),
            reply_tx,
            replies,
        }
    }

    /// Deliver every pending request to `primary`, in arrival order.
    /// Returns the number of requests handled.
    pub fn pump(&self, primary: &Primary) -> usize {
        let mut handled = 0;
        while let Ok(env) = self.inbox_rx.try_recv() {
            let reply = primary.handle(env.request);
            // The secondary may be gone; its reply is dropped.
            let _ = env.reply_to.send(reply);
            handled += 1;
        }
        handled
    }

    /// Post `request` from `from`, let the primary handle it and return
    /// the reply to that request.
    ///
    /// The reply travels on a one-shot channel, so replies to requests
    /// `from` posted earlier stay queued on the handle for its next `drain`.
    pub fn round_trip(
        &self,
        from: &SecondaryHandle,
        primary: &Primary,
        request: Request,
    ) -> AppResult<Reply> {
        let (reply_tx, reply_rx) = mpsc::channel();
        from.send(request, reply_tx)?;
        self.pump(primary);
        reply_rx
            .try_recv()
            .map_err(|_| AppError::Other("no reply from primary context".to_string()))
    }
}

/// A secondary context's endpoint on the bus.
pub struct SecondaryHandle {
    outbox: Sender<Envelope>,
    reply_tx: Sender<Reply>,
    replies: Receiver<Reply>,
}

impl SecondaryHandle {
    /// Queue `request`; its reply lands on this handle.
    pub fn post(&self, request: Request) -> AppResult<()> {
        self.send(request, self.reply_tx.clone())
    }

    fn send(&self, request: Request, reply_to: Sender<Reply>) -> AppResult<()> {
        self.outbox
            .send(Envelope { request, reply_to })
            .map_err(|_| AppError::Other("primary context is gone".to_string()))
    }

    /// Replies received so far.
    pub fn drain(&self) -> Vec<Reply> {
        self.replies.try_iter().collect()
    }
}

/// List window: a snapshot of the records plus a bus endpoint.
pub struct ListView {
    handle: SecondaryHandle,
    snapshot: Vec<OrderRecord>,
    last_error: Option<String>,
}

impl ListView {
    pub fn new(handle: SecondaryHandle, snapshot: Vec<OrderRecord>) -> Self {
        Self {
            handle,
            snapshot,
            last_error: None,
        }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.snapshot
    }

    pub fn filtered(&self, term: &str) -> Vec<&OrderRecord> {
        filter_snapshot(&self.snapshot, term)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Ask the primary to delete `id` and prune it from the snapshot
    /// right away.
    pub fn request_delete(&mut self, id: &str) -> AppResult<()> {
        self.handle.post(Request::DeleteOrder { id: id.to_string() })?;
        self.prune(id);
        Ok(())
    }

    fn prune(&mut self, id: &str) {
        self.snapshot.retain(|r| r.id != id);
    }

    /// Apply pending replies to the snapshot.
    pub fn sync(&mut self) -> Vec<Reply> {
        let replies = self.handle.drain();
        for reply in &replies {
            match reply {
                Reply::OrderDeleted { id } => self.prune(id),
                Reply::Error { message } => self.last_error = Some(message.clone()),
                _ => {}
            }
        }
        replies
    }
}

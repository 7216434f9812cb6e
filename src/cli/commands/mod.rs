pub mod add;
pub mod backup;
pub mod clear;
pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod restore;
pub mod show;

use crate::config::Config;
use crate::core::logic::Core;
use crate::core::sync::{Primary, Reply, Request, SyncBus};
use crate::errors::{AppError, AppResult};

/// Open the store configured in `cfg`.
pub(crate) fn open_core(cfg: &Config) -> AppResult<Core> {
    Core::init(&cfg.database, cfg.open_options())
}

/// Hand a bulk request to the primary context and wait for its reply.
/// An `Error` reply is turned back into an error.
pub(crate) fn send_to_primary(cfg: &Config, request: Request) -> AppResult<Reply> {
    let bus = SyncBus::new();
    let admin = bus.connect();
    let primary = Primary::new(&cfg.database, cfg.open_options());

    match bus.round_trip(&admin, &primary, request)? {
        Reply::Error { message } => Err(AppError::Other(message)),
        reply => Ok(reply),
    }
}

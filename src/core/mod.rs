pub mod add;
pub mod backup;
pub mod del;
pub mod ids;
pub mod import;
pub mod logic;
pub mod query;
pub mod sync;

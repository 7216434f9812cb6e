pub mod field;
pub mod order;

pub use field::OrderField;
pub use order::{EXECUTOR_SLOTS, Executor, ExecutorRole, FormMode, OrderForm, OrderRecord};

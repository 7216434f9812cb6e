use crate::core::logic::Core;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete the order shown in the form. The form only offers delete for
    /// a loaded record, so an unknown id is reported as an error here.
    pub fn apply(core: &Core, id: &str) -> AppResult<()> {
        if !core.delete_by_id(id)? {
            return Err(AppError::NotFound(format!("order {}", id)));
        }

        info(format!("Deleted order {}", id));
        Ok(())
    }
}

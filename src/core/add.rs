use crate::core::ids::generate_id;
use crate::core::logic::Core;
use crate::errors::{AppError, AppResult};
use crate::models::{Executor, ExecutorRole, FormMode, OrderForm};
use crate::ui::messages::success;
use crate::utils::time::today;

/// Field values supplied on the command line; `None` keeps the form value.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub order_number: Option<String>,
    pub date: Option<String>,
    pub diameter: Option<String>,
    pub thickness: Option<String>,
    pub type_size: Option<String>,
    pub cutting: Option<String>,
    pub bottom_number: Option<String>,
    pub material: Option<String>,
    pub heat_treatment: Option<String>,
    pub treatment_date: Option<String>,
    pub executors: Vec<(ExecutorRole, Executor)>,
}

impl FormPatch {
    fn apply_to(self, form: &mut OrderForm) {
        let set = |slot: &mut String, v: Option<String>| {
            if let Some(v) = v {
                *slot = v.trim().to_string();
            }
        };

        set(&mut form.order_number, self.order_number);
        set(&mut form.date, self.date);
        set(&mut form.diameter, self.diameter);
        set(&mut form.thickness, self.thickness);
        set(&mut form.type_size, self.type_size);
        set(&mut form.cutting, self.cutting);
        set(&mut form.bottom_number, self.bottom_number);
        set(&mut form.material, self.material);
        set(&mut form.heat_treatment, self.heat_treatment);
        set(&mut form.treatment_date, self.treatment_date);

        for (role, ex) in self.executors {
            form.executors[role.slot()] = ex;
        }
    }
}

/// Parse `ROLE=NAME[@DATE]`, e.g. `welder=Ivanov@2025-03-01`.
pub fn parse_executor_arg(arg: &str) -> AppResult<(ExecutorRole, Executor)> {
    let (role, rest) = arg.split_once('=').ok_or_else(|| {
        AppError::ValidationFailed(format!("executor '{}' must look like ROLE=NAME[@DATE]", arg))
    })?;

    let role = ExecutorRole::from_label(role).ok_or_else(|| {
        let known: Vec<&str> = ExecutorRole::ALL.iter().map(|r| r.label()).collect();
        AppError::ValidationFailed(format!(
            "unknown executor role '{}' (expected one of: {})",
            role,
            known.join(", ")
        ))
    })?;

    let (name, date) = match rest.split_once('@') {
        Some((n, d)) => (n.trim(), d.trim()),
        None => (rest.trim(), ""),
    };

    Ok((role, Executor::new(name, date)))
}

/// High-level logic of the primary form (`add` command).
pub struct AddLogic;

impl AddLogic {
    /// Save the form in new or edit mode and return the record id.
    ///
    /// New mode starts from an empty form dated today and assigns a fresh
    /// id. Edit mode starts from the stored record; an unknown id is an
    /// error. The record is always written whole.
    pub fn apply(core: &Core, mode: &FormMode, patch: FormPatch) -> AppResult<String> {
        let (id, mut form) = match mode {
            FormMode::New => {
                let form = OrderForm {
                    date: today(),
                    ..OrderForm::default()
                };
                (generate_id(), form)
            }
            FormMode::Edit(id) => {
                let existing = core
                    .load_by_id(id)?
                    .ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;
                (id.clone(), OrderForm::from_record(&existing))
            }
        };

        patch.apply_to(&mut form);
        form.validate()?;

        let record = form.into_record(id);
        let id = core.save(&record)?;

        match mode {
            FormMode::New => success(format!("Order saved: {}", id)),
            FormMode::Edit(_) => success(format!("Order updated: {}", id)),
        }

        Ok(id)
    }
}

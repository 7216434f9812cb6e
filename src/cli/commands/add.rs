use crate::cli::commands::open_core;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, FormPatch, parse_executor_arg};
use crate::errors::AppResult;
use crate::models::FormMode;

/// Create a new order or update an existing one.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        id,
        query,
        order_number,
        date,
        diameter,
        thickness,
        type_size,
        cutting,
        bottom_number,
        material,
        heat_treatment,
        treatment_date,
        executors,
    } = cmd
    {
        //
        // 1. Resolve form mode (new vs edit)
        //
        let mode = match query {
            Some(q) => FormMode::from_query(q),
            None => FormMode::from_id(id.as_deref()),
        };

        //
        // 2. Collect field overrides
        //
        let executors = executors
            .iter()
            .map(|arg| parse_executor_arg(arg))
            .collect::<AppResult<Vec<_>>>()?;

        let patch = FormPatch {
            order_number: order_number.clone(),
            date: date.clone(),
            diameter: diameter.clone(),
            thickness: thickness.clone(),
            type_size: type_size.clone(),
            cutting: cutting.clone(),
            bottom_number: bottom_number.clone(),
            material: material.clone(),
            heat_treatment: heat_treatment.clone(),
            treatment_date: treatment_date.clone(),
            executors,
        };

        //
        // 3. Save
        //
        let mut core = open_core(cfg)?;
        let result = AddLogic::apply(&core, &mode, patch);
        core.close()?;
        result?;
    }

    Ok(())
}

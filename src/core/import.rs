//! Import/merge engine: reconcile a batch of loosely-typed rows with the store.

use crate::core::ids::generate_id;
use crate::db::pool::DbPool;
use crate::db::queries::{find_by_index, put_order};
use crate::errors::{AppError, AppResult};
use crate::export::model::{
    EXECUTOR_HEADERS, H_BOTTOM_NUMBER, H_CUTTING, H_DATE, H_DIAMETER, H_HEAT_TREATMENT,
    H_MATERIAL, H_ORDER_NUMBER, H_THICKNESS, H_TREATMENT_DATE, H_TYPE_SIZE,
};
use crate::models::order::into_slots;
use crate::models::{Executor, OrderField, OrderRecord};
use crate::ui::messages::warning;
use crate::utils::time::now_iso;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// One candidate row, keyed by lower-cased header name.
pub type ImportRow = HashMap<String, String>;

/// Field used to find the existing record a row reconciles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    OrderNumber,
    BottomNumber,
}

impl MatchField {
    pub fn field(&self) -> OrderField {
        match self {
            MatchField::OrderNumber => OrderField::OrderNumber,
            MatchField::BottomNumber => OrderField::BottomNumber,
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            MatchField::OrderNumber => H_ORDER_NUMBER,
            MatchField::BottomNumber => H_BOTTOM_NUMBER,
        }
    }
}

impl FromStr for MatchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OrderField::parse(s)? {
            OrderField::OrderNumber => Ok(MatchField::OrderNumber),
            OrderField::BottomNumber => Ok(MatchField::BottomNumber),
            other => Err(AppError::InvalidField(format!(
                "{} cannot be used as import match field",
                other.name()
            ))),
        }
    }
}

/// Per-batch outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.errored
    }
}

enum Outcome {
    Created,
    Updated,
    Skipped,
}

fn cell(row: &ImportRow, header: &str) -> String {
    row.get(&header.to_lowercase()).cloned().unwrap_or_default()
}

/// Map a row onto the fixed schema. Missing columns become empty strings.
fn normalize(row: &ImportRow, id: String, created_at: String, updated_at: String) -> OrderRecord {
    let executors: Vec<Executor> = EXECUTOR_HEADERS
        .iter()
        .map(|(name, date)| Executor::new(cell(row, name), cell(row, date)))
        .collect();

    OrderRecord {
        id,
        date: Some(cell(row, H_DATE)),
        order_number: Some(cell(row, H_ORDER_NUMBER)),
        diameter: Some(cell(row, H_DIAMETER)),
        thickness: Some(cell(row, H_THICKNESS)),
        type_size: Some(cell(row, H_TYPE_SIZE)),
        cutting: Some(cell(row, H_CUTTING)),
        bottom_number: Some(cell(row, H_BOTTOM_NUMBER)),
        material: Some(cell(row, H_MATERIAL)),
        heat_treatment: Some(cell(row, H_HEAT_TREATMENT)),
        treatment_date: Some(cell(row, H_TREATMENT_DATE)),
        executors: into_slots(executors),
        created_at: Some(created_at),
        updated_at: Some(updated_at),
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Run the merge over `rows`. The batch always completes: a failing row
    /// is counted as errored and the next one is processed. Every row is its
    /// own statement, so an interrupted batch stays partially applied.
    pub fn run(
        pool: &DbPool,
        rows: &[ImportRow],
        match_field: MatchField,
        overwrite: bool,
    ) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for (i, row) in rows.iter().enumerate() {
            match Self::import_row(pool, row, match_field, overwrite) {
                Ok(Outcome::Created) => summary.created += 1,
                Ok(Outcome::Updated) => summary.updated += 1,
                Ok(Outcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    warning(format!("Import row {} failed: {}", i + 1, e));
                    summary.errored += 1;
                }
            }
        }

        summary
    }

    fn import_row(
        pool: &DbPool,
        row: &ImportRow,
        match_field: MatchField,
        overwrite: bool,
    ) -> AppResult<Outcome> {
        let search_key = cell(row, match_field.header());

        // With duplicate keys only the first match (lowest id) is considered.
        let existing = if search_key.is_empty() {
            None
        } else {
            find_by_index(pool, match_field.field(), &search_key)?
                .into_iter()
                .next()
        };

        if existing.is_some() && !overwrite {
            return Ok(Outcome::Skipped);
        }

        let now = now_iso();
        let (id, created_at, outcome) = match existing {
            Some(rec) => (
                rec.id,
                rec.created_at.unwrap_or_else(|| now.clone()),
                Outcome::Updated,
            ),
            None => (generate_id(), now.clone(), Outcome::Created),
        };

        let record = normalize(row, id, created_at, now);
        put_order(pool, &record)?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_executor_pairs_by_position() {
        let mut row = ImportRow::new();
        row.insert("номер заказа".into(), "ORD-1".into());
        row.insert("резчик".into(), "Petrov".into());
        row.insert("дата резки".into(), "2025-02-02".into());
        row.insert("сварщик".into(), "Ivanov".into());

        let rec = normalize(&row, "id-1".into(), "c".into(), "u".into());
        assert_eq!(rec.order_number.as_deref(), Some("ORD-1"));
        assert_eq!(rec.material.as_deref(), Some(""));
        assert_eq!(rec.executors[0].name, "Ivanov");
        assert_eq!(rec.executors[5], Executor::new("Petrov", "2025-02-02"));
        assert!(rec.executors[2].is_empty());
    }

    #[test]
    fn match_field_parses_only_supported_fields() {
        assert_eq!(
            "bottomNumber".parse::<MatchField>().unwrap(),
            MatchField::BottomNumber
        );
        assert_eq!(
            "order_number".parse::<MatchField>().unwrap(),
            MatchField::OrderNumber
        );
        assert!("material".parse::<MatchField>().is_err());
    }
}

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

use crate::errors::{AppError, AppResult};

/// Number of executor slots carried by every order.
pub const EXECUTOR_SLOTS: usize = 6;

/// Fixed production roles, one per executor slot (position is meaningful).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorRole {
    Welder,      // 0
    Stamping,    // 1
    Flanging,    // 2
    Calibration, // 3
    PlugWelder,  // 4
    Cutter,      // 5
}

impl ExecutorRole {
    pub const ALL: [ExecutorRole; EXECUTOR_SLOTS] = [
        ExecutorRole::Welder,
        ExecutorRole::Stamping,
        ExecutorRole::Flanging,
        ExecutorRole::Calibration,
        ExecutorRole::PlugWelder,
        ExecutorRole::Cutter,
    ];

    pub fn slot(&self) -> usize {
        match self {
            ExecutorRole::Welder => 0,
            ExecutorRole::Stamping => 1,
            ExecutorRole::Flanging => 2,
            ExecutorRole::Calibration => 3,
            ExecutorRole::PlugWelder => 4,
            ExecutorRole::Cutter => 5,
        }
    }

    /// Short English label used by the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutorRole::Welder => "welder",
            ExecutorRole::Stamping => "stamping",
            ExecutorRole::Flanging => "flanging",
            ExecutorRole::Calibration => "calibration",
            ExecutorRole::PlugWelder => "plug-welder",
            ExecutorRole::Cutter => "cutter",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|r| r.label() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

impl Executor {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.date.is_empty()
    }
}

/// Persisted order entry (the only entity in the store).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_treatment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_slots")]
    pub executors: [Executor; EXECUTOR_SLOTS],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl OrderRecord {
    /// Empty record with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn executor(&self, role: ExecutorRole) -> &Executor {
        &self.executors[role.slot()]
    }
}

/// Accepts an executor array of any length: short arrays are padded with
/// empty slots, extra entries are dropped, `null` yields six empty slots.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<[Executor; EXECUTOR_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Executor>> = Option::deserialize(deserializer)?;
    Ok(into_slots(raw.unwrap_or_default()))
}

pub fn into_slots(list: Vec<Executor>) -> [Executor; EXECUTOR_SLOTS] {
    let mut slots: [Executor; EXECUTOR_SLOTS] = Default::default();
    for (slot, ex) in slots.iter_mut().zip(list) {
        *slot = ex;
    }
    slots
}

/// How the primary form was addressed: a fresh record or an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit(String),
}

impl FormMode {
    /// Parse a navigation query such as `?id=<id>` or `index.html?id=<id>&x=1`.
    /// No `id` parameter (or an empty one) means new-record mode.
    pub fn from_query(query: &str) -> Self {
        let qs = match query.split_once('?') {
            Some((_, rest)) => rest,
            None => query,
        };

        for pair in qs.split('&') {
            if let Some((key, value)) = pair.split_once('=')
                && key == "id"
                && !value.is_empty()
            {
                return FormMode::Edit(value.to_string());
            }
        }

        FormMode::New
    }

    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(v) if !v.is_empty() => FormMode::Edit(v.to_string()),
            _ => FormMode::New,
        }
    }
}

fn order_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9\-]+$").expect("static regex"))
}

/// Input collected by the primary form. Only this path is validated;
/// import and restore write whatever they receive.
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub order_number: String,
    pub date: String,
    pub diameter: String,
    pub thickness: String,
    pub type_size: String,
    pub cutting: String,
    pub bottom_number: String,
    pub material: String,
    pub heat_treatment: String,
    pub treatment_date: String,
    pub executors: [Executor; EXECUTOR_SLOTS],
}

impl OrderForm {
    /// Pre-fill the form from a stored record (edit mode).
    pub fn from_record(rec: &OrderRecord) -> Self {
        let s = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            order_number: s(&rec.order_number),
            date: s(&rec.date),
            diameter: s(&rec.diameter),
            thickness: s(&rec.thickness),
            type_size: s(&rec.type_size),
            cutting: s(&rec.cutting),
            bottom_number: s(&rec.bottom_number),
            material: s(&rec.material),
            heat_treatment: s(&rec.heat_treatment),
            treatment_date: s(&rec.treatment_date),
            executors: rec.executors.clone(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.order_number.is_empty() || self.date.is_empty() {
            return Err(AppError::ValidationFailed(
                "order number and date are required".to_string(),
            ));
        }

        if !order_number_pattern().is_match(&self.order_number) {
            return Err(AppError::ValidationFailed(format!(
                "order number '{}' may contain only letters, digits and hyphens",
                self.order_number
            )));
        }

        Ok(())
    }

    /// Build the full record to persist. Timestamps are left to the store.
    pub fn into_record(self, id: String) -> OrderRecord {
        OrderRecord {
            id,
            order_number: Some(self.order_number),
            date: Some(self.date),
            diameter: Some(self.diameter),
            thickness: Some(self.thickness),
            type_size: Some(self.type_size),
            cutting: Some(self.cutting),
            bottom_number: Some(self.bottom_number),
            material: Some(self.material),
            heat_treatment: Some(self.heat_treatment),
            treatment_date: Some(self.treatment_date),
            executors: self.executors,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> OrderForm {
        OrderForm {
            order_number: "ORD-12".into(),
            date: "2025-03-01".into(),
            ..OrderForm::default()
        }
    }

    #[test]
    fn form_requires_order_number_and_date() {
        let mut form = valid_form();
        form.date.clear();
        assert!(matches!(form.validate(), Err(AppError::ValidationFailed(_))));

        let mut form = valid_form();
        form.order_number.clear();
        assert!(matches!(form.validate(), Err(AppError::ValidationFailed(_))));

        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn form_rejects_order_number_outside_pattern() {
        let mut form = valid_form();
        form.order_number = "ORD 12".into();
        assert!(form.validate().is_err());

        form.order_number = "ORD/12".into();
        assert!(form.validate().is_err());

        form.order_number = "abc-123-XYZ".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn form_mode_from_query() {
        assert_eq!(
            FormMode::from_query("index.html?id=abc-1"),
            FormMode::Edit("abc-1".into())
        );
        assert_eq!(
            FormMode::from_query("?x=1&id=z9"),
            FormMode::Edit("z9".into())
        );
        assert_eq!(FormMode::from_query("?id="), FormMode::New);
        assert_eq!(FormMode::from_query("index.html"), FormMode::New);
        assert_eq!(FormMode::from_query(""), FormMode::New);
    }

    #[test]
    fn executors_are_padded_and_truncated() {
        let json = r#"{"id":"a","executors":[{"name":"Ivan","date":"2025-01-01"}]}"#;
        let rec: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.executor(ExecutorRole::Welder).name, "Ivan");
        assert!(rec.executor(ExecutorRole::Cutter).is_empty());

        let many: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"name":"n{i}","date":""}}"#))
            .collect();
        let json = format!(r#"{{"id":"b","executors":[{}]}}"#, many.join(","));
        let rec: OrderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec.executors[5].name, "n5");

        let rec: OrderRecord = serde_json::from_str(r#"{"id":"c"}"#).unwrap();
        assert!(rec.executors.iter().all(Executor::is_empty));
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let mut rec = OrderRecord::with_id("x");
        rec.order_number = Some("A-1".into());
        rec.created_at = Some("2024-01-01T00:00:00Z".into());
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"orderNumber\":\"A-1\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("bottomNumber"));
    }
}

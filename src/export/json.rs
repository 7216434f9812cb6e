use crate::errors::{AppError, AppResult};
use crate::models::OrderRecord;
use crate::utils::time::now_iso;
use serde::{Deserialize, Serialize};

/// On-disk backup document: `{ timestamp, totalRecords, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    pub timestamp: String,
    pub total_records: usize,
    pub data: Vec<OrderRecord>,
}

impl BackupFile {
    pub fn new(data: Vec<OrderRecord>) -> Self {
        Self {
            timestamp: now_iso(),
            total_records: data.len(),
            data,
        }
    }

    pub fn to_pretty_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a backup document. Only a `data` array is required;
    /// `timestamp` and `totalRecords` are informational.
    pub fn from_json(content: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        let data = match value.get("data") {
            Some(d) if d.is_array() => d.clone(),
            _ => {
                return Err(AppError::InvalidBackup(
                    "missing 'data' array".to_string(),
                ));
            }
        };

        let data: Vec<OrderRecord> = serde_json::from_value(data)?;
        let timestamp = value
            .get("timestamp")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            timestamp,
            total_records: data.len(),
            data,
        })
    }
}

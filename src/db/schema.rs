//! Declarative description of the persisted `orders` table.

use crate::models::OrderField;

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 3;

/// Logical store name (used for the default database file name).
pub const STORE_NAME: &str = "orders";

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub table: &'static str,
    pub indexes: Vec<OrderField>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            table: STORE_NAME,
            indexes: OrderField::INDEXED.to_vec(),
        }
    }
}

impl TableSchema {
    /// `CREATE TABLE` + `CREATE INDEX` statements for this table.
    pub fn create_sql(&self) -> String {
        let mut sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {t} (
                id              TEXT PRIMARY KEY NOT NULL,
                order_number    TEXT,
                date            TEXT,
                diameter        TEXT,
                thickness       TEXT,
                type_size       TEXT,
                cutting         TEXT,
                bottom_number   TEXT,
                material        TEXT,
                heat_treatment  TEXT,
                treatment_date  TEXT,
                executors       TEXT NOT NULL DEFAULT '[]',
                created_at      TEXT,
                updated_at      TEXT
            );
            "#,
            t = self.table
        );

        for field in &self.indexes {
            sql.push_str(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{t}_{c} ON {t}({c});\n",
                t = self.table,
                c = field.column()
            ));
        }

        sql
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", self.table)
    }

    pub fn has_index(&self, field: OrderField) -> bool {
        self.indexes.contains(&field)
    }
}

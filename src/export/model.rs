// src/export/model.rs

use crate::models::OrderRecord;

/// Fixed CSV header (export order). Import looks columns up by name,
/// case-insensitively, so any column order is accepted there.
pub const CSV_HEADERS: [&str; 25] = [
    "ID",
    "Дата заказа",
    "Номер заказа",
    "Диаметр (мм)",
    "Толщина (мм)",
    "Типоразмер",
    "Раскрой",
    "Номер днища",
    "Материал",
    "Режим ТО",
    "Дата ТО",
    "Сварщик",
    "Дата сварки",
    "Штамповка",
    "Дата штамповки",
    "Отбортовка",
    "Дата отбортовки",
    "Калибровка",
    "Дата калибровки",
    "Сварщик (заглушки)",
    "Дата сварки заглушек",
    "Резчик",
    "Дата резки",
    "Дата создания",
    "Дата обновления",
];

pub const H_DATE: &str = CSV_HEADERS[1];
pub const H_ORDER_NUMBER: &str = CSV_HEADERS[2];
pub const H_DIAMETER: &str = CSV_HEADERS[3];
pub const H_THICKNESS: &str = CSV_HEADERS[4];
pub const H_TYPE_SIZE: &str = CSV_HEADERS[5];
pub const H_CUTTING: &str = CSV_HEADERS[6];
pub const H_BOTTOM_NUMBER: &str = CSV_HEADERS[7];
pub const H_MATERIAL: &str = CSV_HEADERS[8];
pub const H_HEAT_TREATMENT: &str = CSV_HEADERS[9];
pub const H_TREATMENT_DATE: &str = CSV_HEADERS[10];

/// (name, date) header pairs of the six executor slots, in slot order.
pub const EXECUTOR_HEADERS: [(&str, &str); 6] = [
    (CSV_HEADERS[11], CSV_HEADERS[12]),
    (CSV_HEADERS[13], CSV_HEADERS[14]),
    (CSV_HEADERS[15], CSV_HEADERS[16]),
    (CSV_HEADERS[17], CSV_HEADERS[18]),
    (CSV_HEADERS[19], CSV_HEADERS[20]),
    (CSV_HEADERS[21], CSV_HEADERS[22]),
];

/// Flatten a record into the 25 export columns (absent values → "").
pub(crate) fn order_to_row(o: &OrderRecord) -> Vec<String> {
    let s = |v: &Option<String>| v.clone().unwrap_or_default();

    let mut row = vec![
        o.id.clone(),
        s(&o.date),
        s(&o.order_number),
        s(&o.diameter),
        s(&o.thickness),
        s(&o.type_size),
        s(&o.cutting),
        s(&o.bottom_number),
        s(&o.material),
        s(&o.heat_treatment),
        s(&o.treatment_date),
    ];

    for ex in &o.executors {
        row.push(ex.name.clone());
        row.push(ex.date.clone());
    }

    row.push(s(&o.created_at));
    row.push(s(&o.updated_at));
    row
}

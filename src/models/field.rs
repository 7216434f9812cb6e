use super::order::OrderRecord;
use crate::errors::{AppError, AppResult};

/// Addressable fields of an order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Id,
    OrderNumber,
    Date,
    Diameter,
    Thickness,
    TypeSize,
    Cutting,
    BottomNumber,
    Material,
    HeatTreatment,
    TreatmentDate,
    CreatedAt,
    UpdatedAt,
}

impl OrderField {
    pub const ALL: [OrderField; 13] = [
        OrderField::Id,
        OrderField::OrderNumber,
        OrderField::Date,
        OrderField::Diameter,
        OrderField::Thickness,
        OrderField::TypeSize,
        OrderField::Cutting,
        OrderField::BottomNumber,
        OrderField::Material,
        OrderField::HeatTreatment,
        OrderField::TreatmentDate,
        OrderField::CreatedAt,
        OrderField::UpdatedAt,
    ];

    /// Fields with a secondary (non-unique) index.
    pub const INDEXED: [OrderField; 7] = [
        OrderField::OrderNumber,
        OrderField::Date,
        OrderField::Material,
        OrderField::BottomNumber,
        OrderField::Diameter,
        OrderField::Thickness,
        OrderField::CreatedAt,
    ];

    /// Record key name (camelCase, as in JSON backups).
    pub fn name(&self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::OrderNumber => "orderNumber",
            OrderField::Date => "date",
            OrderField::Diameter => "diameter",
            OrderField::Thickness => "thickness",
            OrderField::TypeSize => "typeSize",
            OrderField::Cutting => "cutting",
            OrderField::BottomNumber => "bottomNumber",
            OrderField::Material => "material",
            OrderField::HeatTreatment => "heatTreatment",
            OrderField::TreatmentDate => "treatmentDate",
            OrderField::CreatedAt => "createdAt",
            OrderField::UpdatedAt => "updatedAt",
        }
    }

    /// Column name in the `orders` table.
    pub fn column(&self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::OrderNumber => "order_number",
            OrderField::Date => "date",
            OrderField::Diameter => "diameter",
            OrderField::Thickness => "thickness",
            OrderField::TypeSize => "type_size",
            OrderField::Cutting => "cutting",
            OrderField::BottomNumber => "bottom_number",
            OrderField::Material => "material",
            OrderField::HeatTreatment => "heat_treatment",
            OrderField::TreatmentDate => "treatment_date",
            OrderField::CreatedAt => "created_at",
            OrderField::UpdatedAt => "updated_at",
        }
    }

    pub fn is_indexed(&self) -> bool {
        Self::INDEXED.contains(self)
    }

    /// Parse a field name: accepts the camelCase key or the column name,
    /// case-insensitively.
    pub fn parse(s: &str) -> AppResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().to_ascii_lowercase() == wanted || f.column() == wanted)
            .ok_or_else(|| AppError::InvalidField(s.to_string()))
    }

    /// Value of this field on `rec`, `None` when absent.
    pub fn value<'a>(&self, rec: &'a OrderRecord) -> Option<&'a str> {
        let v = match self {
            OrderField::Id => return Some(rec.id.as_str()),
            OrderField::OrderNumber => &rec.order_number,
            OrderField::Date => &rec.date,
            OrderField::Diameter => &rec.diameter,
            OrderField::Thickness => &rec.thickness,
            OrderField::TypeSize => &rec.type_size,
            OrderField::Cutting => &rec.cutting,
            OrderField::BottomNumber => &rec.bottom_number,
            OrderField::Material => &rec.material,
            OrderField::HeatTreatment => &rec.heat_treatment,
            OrderField::TreatmentDate => &rec.treatment_date,
            OrderField::CreatedAt => &rec.created_at,
            OrderField::UpdatedAt => &rec.updated_at,
        };
        v.as_deref()
    }

    /// Stringified value used for sorting (empty string when absent).
    pub fn sort_key<'a>(&self, rec: &'a OrderRecord) -> &'a str {
        self.value(rec).unwrap_or("")
    }
}

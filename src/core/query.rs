//! In-memory sort and exact-match search over stored orders.

use crate::db::pool::DbPool;
use crate::db::queries::{find_by_index, get_order};
use crate::errors::{AppError, AppResult};
use crate::models::{OrderField, OrderRecord};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AppError::InvalidDirection(other.to_string())),
        }
    }
}

/// Stable sort on the stringified field value (`""` when absent).
///
/// Plain string comparison: "10" sorts before "9", dates only sort
/// correctly when stored as `YYYY-MM-DD`.
pub fn sort_records(records: &mut [OrderRecord], field: OrderField, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ord: Ordering = field.sort_key(a).cmp(field.sort_key(b));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Exact-match search. `Id` yields at most one record; every other field
/// goes through the store's index equality lookup.
pub fn search(pool: &DbPool, term: &str, field: OrderField) -> AppResult<Vec<OrderRecord>> {
    if field == OrderField::Id {
        return Ok(get_order(pool, term)?.into_iter().collect());
    }
    find_by_index(pool, field, term)
}

/// Case-insensitive substring filter over order number or bottom number,
/// applied to a snapshot already held by a list view.
pub fn filter_snapshot<'a>(records: &'a [OrderRecord], term: &str) -> Vec<&'a OrderRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    let hit = |v: &Option<String>| {
        v.as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&needle))
    };

    records
        .iter()
        .filter(|r| hit(&r.order_number) || hit(&r.bottom_number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, order: Option<&str>, bottom: Option<&str>) -> OrderRecord {
        let mut r = OrderRecord::with_id(id);
        r.order_number = order.map(String::from);
        r.bottom_number = bottom.map(String::from);
        r
    }

    fn ids(records: &[OrderRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn sort_is_string_based_not_numeric() {
        let mut v = vec![
            rec("a", Some("9"), None),
            rec("b", Some("10"), None),
            rec("c", Some("100"), None),
        ];
        sort_records(&mut v, OrderField::OrderNumber, SortDirection::Asc);
        assert_eq!(ids(&v), vec!["b", "c", "a"]);
    }

    #[test]
    fn absent_values_sort_as_empty() {
        let mut v = vec![rec("a", Some("X"), None), rec("b", None, None)];
        sort_records(&mut v, OrderField::OrderNumber, SortDirection::Asc);
        assert_eq!(ids(&v), vec!["b", "a"]);
    }

    #[test]
    fn reversed_direction_reverses_distinct_values() {
        let base = vec![
            rec("1", Some("ORD-3"), None),
            rec("2", Some("ORD-1"), None),
            rec("3", Some("ORD-2"), None),
            rec("4", Some("A-9"), None),
        ];
        let mut asc = base.clone();
        let mut desc = base;
        sort_records(&mut asc, OrderField::OrderNumber, SortDirection::Asc);
        sort_records(&mut desc, OrderField::OrderNumber, SortDirection::Asc.reversed());

        let mut asc_ids = ids(&asc);
        asc_ids.reverse();
        assert_eq!(asc_ids, ids(&desc));
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut v = vec![
            rec("first", Some("same"), None),
            rec("second", Some("same"), None),
        ];
        sort_records(&mut v, OrderField::OrderNumber, SortDirection::Desc);
        assert_eq!(ids(&v), vec!["first", "second"]);
    }

    #[test]
    fn snapshot_filter_matches_either_field() {
        let v = vec![
            rec("1", Some("ORD-100"), Some("B-7")),
            rec("2", Some("X-1"), Some("b-700")),
            rec("3", None, None),
        ];
        assert_eq!(filter_snapshot(&v, "ord").len(), 1);
        assert_eq!(filter_snapshot(&v, "B-7").len(), 2);
        assert_eq!(filter_snapshot(&v, "").len(), 3);
        assert!(filter_snapshot(&v, "zzz").is_empty());
    }

    #[test]
    fn direction_parses() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}

mod common;
use common::open_core;

use rorders::core::import::{ImportLogic, MatchField};
use rorders::db::queries::count_orders;
use rorders::errors::AppError;
use rorders::export::csv::parse_csv;
use rorders::models::{OrderField, OrderRecord};
use tempfile::tempdir;

const SHEET: &str = "\u{feff}ID,Дата заказа,Номер заказа,Номер днища,Материал,Резчик,Дата резки\n\
                     ,2025-01-10,ORD-1,B-1,Сталь,Petrov,2025-01-12\n\
                     ,2025-01-11,ORD-2,B-2,Медь,,\n\
                     ,2025-01-12,,B-3,Сталь,,\n";

#[test]
fn fresh_import_creates_every_valid_row() {
    let dir = tempdir().unwrap();
    let core = open_core(dir.path().join("o.sqlite").to_str().unwrap());

    let rows = parse_csv(SHEET).unwrap();
    // The row without an order number never reaches the merge.
    assert_eq!(rows.len(), 2);

    let s = core
        .import_batch(&rows, MatchField::OrderNumber, false)
        .unwrap();
    assert_eq!((s.created, s.updated, s.skipped, s.errored), (2, 0, 0, 0));

    let hit = core.search_exact("ORD-1", OrderField::OrderNumber).unwrap();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].executors[5].name, "Petrov");
    assert_eq!(hit[0].thickness.as_deref(), Some(""));
}

#[test]
fn existing_rows_are_skipped_without_overwrite() {
    let dir = tempdir().unwrap();
    let core = open_core(dir.path().join("o.sqlite").to_str().unwrap());
    let rows = parse_csv(SHEET).unwrap();

    core.import_batch(&rows, MatchField::OrderNumber, false)
        .unwrap();
    let s = core
        .import_batch(&rows, MatchField::OrderNumber, false)
        .unwrap();

    assert_eq!((s.created, s.skipped), (0, 2));
    assert_eq!(count_orders(core.pool()).unwrap(), 2);
}

#[test]
fn overwrite_updates_in_place_and_keeps_created_at() {
    let dir = tempdir().unwrap();
    let core = open_core(dir.path().join("o.sqlite").to_str().unwrap());

    let rows = parse_csv(SHEET).unwrap();
    core.import_batch(&rows, MatchField::OrderNumber, false)
        .unwrap();
    let before = core.search_exact("ORD-2", OrderField::OrderNumber).unwrap()[0].clone();

    let changed = "Номер заказа,Дата заказа,Материал\nORD-2,2025-02-01,Латунь\n";
    let s = core
        .import_batch(&parse_csv(changed).unwrap(), MatchField::OrderNumber, true)
        .unwrap();
    assert_eq!((s.created, s.updated), (0, 1));

    let after = core.search_exact("ORD-2", OrderField::OrderNumber).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, before.id);
    assert_eq!(after[0].created_at, before.created_at);
    assert_eq!(after[0].material.as_deref(), Some("Латунь"));
    // Columns absent from the sheet are blanked.
    assert_eq!(after[0].bottom_number.as_deref(), Some(""));
}

#[test]
fn matching_by_bottom_number() {
    let dir = tempdir().unwrap();
    let core = open_core(dir.path().join("o.sqlite").to_str().unwrap());

    core.import_batch(&parse_csv(SHEET).unwrap(), MatchField::BottomNumber, false)
        .unwrap();

    // Same bottom number, new order number: one match, one new.
    let sheet = "Номер заказа,Дата заказа,Номер днища\nORD-9,2025-03-01,B-1\nORD-8,2025-03-01,B-77\n";
    let s = core
        .import_batch(&parse_csv(sheet).unwrap(), MatchField::BottomNumber, true)
        .unwrap();
    assert_eq!((s.created, s.updated), (1, 1));

    let b1 = core.search_exact("B-1", OrderField::BottomNumber).unwrap();
    assert_eq!(b1.len(), 1);
    assert_eq!(b1[0].order_number.as_deref(), Some("ORD-9"));
}

#[test]
fn closed_store_fails_the_whole_batch() {
    let dir = tempdir().unwrap();
    let mut core = open_core(dir.path().join("o.sqlite").to_str().unwrap());
    core.close().unwrap();

    let rows = parse_csv(SHEET).unwrap();
    let err = core
        .import_batch(&rows, MatchField::OrderNumber, false)
        .unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable));
}

#[test]
fn failing_rows_are_counted_and_the_batch_completes() {
    let dir = tempdir().unwrap();
    let mut core = open_core(dir.path().join("o.sqlite").to_str().unwrap());
    core.close().unwrap();

    // Bypassing the facade: every row hits the closed store on its own.
    let rows = parse_csv(SHEET).unwrap();
    let s = ImportLogic::run(core.pool(), &rows, MatchField::OrderNumber, false);
    assert_eq!(s.errored, 2);
    assert_eq!(s.total(), rows.len());
}

#[test]
fn shared_match_key_updates_only_the_lowest_id() {
    let dir = tempdir().unwrap();
    let core = open_core(dir.path().join("o.sqlite").to_str().unwrap());

    // Saved out of key order on purpose.
    for id in ["b", "a"] {
        let mut rec = OrderRecord::with_id(id);
        rec.order_number = Some("ORD-X".to_string());
        rec.date = Some("2025-04-01".to_string());
        core.save(&rec).unwrap();
    }

    let sheet = "Номер заказа,Дата заказа,Материал\nORD-X,2025-04-02,M\n";
    let s = core
        .import_batch(&parse_csv(sheet).unwrap(), MatchField::OrderNumber, true)
        .unwrap();
    assert_eq!((s.created, s.updated, s.skipped, s.errored), (0, 1, 0, 0));

    let a = core.load_by_id("a").unwrap().unwrap();
    let b = core.load_by_id("b").unwrap().unwrap();
    assert_eq!(a.material.as_deref(), Some("M"));
    assert_eq!(b.material, None);
    assert_eq!(b.date.as_deref(), Some("2025-04-01"));
}

#[test]
fn one_failing_row_does_not_affect_its_neighbours() {
    let dir = tempdir().unwrap();
    let core = open_core(dir.path().join("o.sqlite").to_str().unwrap());

    core.pool()
        .conn()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_bad_material BEFORE INSERT ON orders
             WHEN NEW.material = 'BAD'
             BEGIN SELECT RAISE(ABORT, 'material rejected'); END;",
        )
        .unwrap();

    let sheet = "Номер заказа,Дата заказа,Материал\n\
                 ORD-1,2025-05-01,Steel\n\
                 ORD-2,2025-05-01,BAD\n\
                 ORD-3,2025-05-01,Copper\n";
    let s = core
        .import_batch(&parse_csv(sheet).unwrap(), MatchField::OrderNumber, false)
        .unwrap();
    assert_eq!((s.created, s.updated, s.skipped, s.errored), (2, 0, 0, 1));

    for (number, expected) in [("ORD-1", 1), ("ORD-2", 0), ("ORD-3", 1)] {
        let hits = core.search_exact(number, OrderField::OrderNumber).unwrap();
        assert_eq!(hits.len(), expected, "{number}");
    }
}

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_orders, open_core, ror, setup_test_db, temp_out};
use rorders::models::OrderField;

/// Id of the single order with the given order number.
fn id_of(db_path: &str, number: &str) -> String {
    let mut core = open_core(db_path);
    let hits = core
        .search_exact(number, OrderField::OrderNumber)
        .expect("search");
    core.close().expect("close");
    assert_eq!(hits.len(), 1);
    hits[0].id.clone()
}

#[test]
fn test_add_and_list() {
    let db_path = setup_test_db("add_and_list");
    init_db_with_orders(&db_path);

    ror()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("ORD-100"))
        .stdout(contains("ORD-200"))
        .stdout(contains("2 order(s)"));
}

#[test]
fn test_add_rejects_invalid_order_number() {
    let db_path = setup_test_db("add_invalid");
    ror()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    ror()
        .args(["--db", &db_path, "add", "--number", "ORD 1", "--date", "2025-01-01"])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));

    ror()
        .args(["--db", &db_path, "add", "--date", "2025-01-01"])
        .assert()
        .failure()
        .stderr(contains("required"));

    ror()
        .args([
            "--db",
            &db_path,
            "add",
            "--number",
            "ORD-1",
            "--executor",
            "painter=Someone",
        ])
        .assert()
        .failure()
        .stderr(contains("unknown executor role"));
}

#[test]
fn test_edit_keeps_other_fields() {
    let db_path = setup_test_db("edit_order");
    init_db_with_orders(&db_path);
    let id = id_of(&db_path, "ORD-100");

    ror()
        .args(["--db", &db_path, "add", "--id", &id, "--material", "Copper"])
        .assert()
        .success()
        .stdout(contains("Order updated"));

    let query = format!("index.html?id={}", id);
    ror()
        .args([
            "--db",
            &db_path,
            "add",
            "--query",
            &query,
            "--executor",
            "cutter=Petrov@2025-10-01",
        ])
        .assert()
        .success();

    ror()
        .args(["--db", &db_path, "show", &id])
        .assert()
        .success()
        .stdout(contains("ORD-100"))
        .stdout(contains("Copper"))
        .stdout(contains("B-7"))
        .stdout(contains("Petrov"));
}

#[test]
fn test_edit_unknown_id_fails() {
    let db_path = setup_test_db("edit_unknown");
    init_db_with_orders(&db_path);

    ror()
        .args(["--db", &db_path, "add", "--id", "no-such-id", "--material", "X"])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    ror()
        .args(["--db", &db_path, "show", "no-such-id"])
        .assert()
        .failure();
}

#[test]
fn test_del_order() {
    let db_path = setup_test_db("del_order");
    init_db_with_orders(&db_path);
    let id = id_of(&db_path, "ORD-100");

    ror()
        .args(["--db", &db_path, "del", &id, "--yes"])
        .assert()
        .success();

    ror()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("ORD-100").not())
        .stdout(contains("ORD-200"));

    ror()
        .args(["--db", &db_path, "del", &id, "--yes"])
        .assert()
        .failure();
}

#[test]
fn test_list_sort_search_filter() {
    let db_path = setup_test_db("list_sort_search");
    init_db_with_orders(&db_path);

    let out = ror()
        .args(["--db", &db_path, "list", "--sort", "orderNumber", "--dir", "asc"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf8");
    let first = text.find("ORD-100").expect("ORD-100 listed");
    let second = text.find("ORD-200").expect("ORD-200 listed");
    assert!(first < second);

    ror()
        .args(["--db", &db_path, "list", "--search", "B-8", "--field", "bottomNumber"])
        .assert()
        .success()
        .stdout(contains("ORD-200"))
        .stdout(contains("ORD-100").not());

    // Exact match only.
    ror()
        .args(["--db", &db_path, "list", "--search", "ORD"])
        .assert()
        .success()
        .stdout(contains("No orders to show"));

    ror()
        .args(["--db", &db_path, "list", "--filter", "ord-1"])
        .assert()
        .success()
        .stdout(contains("ORD-100"))
        .stdout(contains("ORD-200").not());

    ror()
        .args(["--db", &db_path, "list", "--search", "x", "--field", "typeSize"])
        .assert()
        .failure();

    ror()
        .args(["--db", &db_path, "list", "--dir", "sideways"])
        .assert()
        .failure();
}

#[test]
fn test_list_delete_goes_through_primary() {
    let db_path = setup_test_db("list_delete");
    init_db_with_orders(&db_path);
    let id = id_of(&db_path, "ORD-200");

    ror()
        .args(["--db", &db_path, "list", "--delete", &id])
        .assert()
        .success()
        .stdout(contains("Deleted 1 order(s)"))
        .stdout(contains("ORD-200").not());

    let core = open_core(&db_path);
    assert!(core.load_by_id(&id).expect("load").is_none());
}

#[test]
fn test_list_delete_counts_only_removed_orders() {
    let db_path = setup_test_db("list_delete_mixed");
    init_db_with_orders(&db_path);
    let id = id_of(&db_path, "ORD-100");

    ror()
        .args([
            "--db", &db_path, "list", "--delete", &id, "--delete", "no-such-id", "--delete", &id,
        ])
        .assert()
        .success()
        .stdout(contains("Deleted 1 order(s)"))
        .stdout(contains("No order with id: no-such-id"))
        .stdout(contains("1 order(s)"));

    ror()
        .args(["--db", &db_path, "list", "--delete", "no-such-id"])
        .assert()
        .success()
        .stdout(contains("Deleted").not())
        .stdout(contains("No order with id: no-such-id"))
        .stdout(contains("ORD-200"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("export_csv_json");
    init_db_with_orders(&db_path);

    let csv_out = temp_out("export_csv_json", "csv");
    ror()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &csv_out])
        .assert()
        .success();

    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    assert!(content.starts_with("ID,Дата заказа,Номер заказа"));
    assert!(content.contains("ORD-100"));
    assert!(content.contains("Ivanov"));

    let json_out = temp_out("export_csv_json", "json");
    ror()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &json_out])
        .assert()
        .success();

    let content = fs::read_to_string(&json_out).expect("read exported json");
    assert!(content.contains("\"totalRecords\": 2"));
    assert!(content.contains("\"orderNumber\": \"ORD-200\""));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_orders(&db_path);

    ror()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn test_import_csv() {
    let db_path = setup_test_db("import_csv");
    init_db_with_orders(&db_path);

    let sheet = temp_out("import_csv", "csv");
    fs::write(
        &sheet,
        "Номер заказа,Дата заказа,Материал\nORD-100,2025-09-01,Brass\nORD-300,2025-09-20,Steel\n",
    )
    .expect("write sheet");

    ror()
        .args(["--db", &db_path, "import", "--file", &sheet])
        .assert()
        .success()
        .stdout(contains("1 created, 0 updated, 1 skipped, 0 errored"));

    ror()
        .args(["--db", &db_path, "import", "--file", &sheet, "--overwrite"])
        .assert()
        .success()
        .stdout(contains("0 created, 2 updated"));

    ror()
        .args(["--db", &db_path, "list", "--search", "ORD-100"])
        .assert()
        .success()
        .stdout(contains("Brass"));
}

#[test]
fn test_backup_clear_restore() {
    let db_path = setup_test_db("backup_clear_restore");
    init_db_with_orders(&db_path);
    let backup = temp_out("backup_clear_restore", "json");

    ror()
        .args(["--db", &db_path, "backup", "--file", &backup])
        .assert()
        .success()
        .stdout(contains("2 records"));

    // Declined confirmation leaves everything in place.
    ror()
        .args(["--db", &db_path, "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    ror()
        .args(["--db", &db_path, "clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("Cleared 2 order(s)"));

    ror()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No orders to show"));

    ror()
        .args(["--db", &db_path, "restore", "--file", &backup, "--yes"])
        .assert()
        .success()
        .stdout(contains("Restored 2 order(s)"));

    ror()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("ORD-100"))
        .stdout(contains("ORD-200"));
}

#[test]
fn test_compressed_backup_restores() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_orders(&db_path);
    let backup = temp_out("backup_zip", "json");
    let zip = temp_out("backup_zip", "zip");

    ror()
        .args(["--db", &db_path, "backup", "--file", &backup, "--compress", "--force"])
        .assert()
        .success();
    assert!(std::path::Path::new(&zip).exists());

    ror()
        .args(["--db", &db_path, "restore", "--file", &zip, "--yes"])
        .assert()
        .success()
        .stdout(contains("Restored 2 order(s)"));
}

#[test]
fn test_restore_rejects_document_without_data() {
    let db_path = setup_test_db("restore_invalid");
    init_db_with_orders(&db_path);
    let bad = temp_out("restore_invalid", "json");
    fs::write(&bad, r#"{"timestamp":"x","totalRecords":0}"#).expect("write");

    ror()
        .args(["--db", &db_path, "restore", "--file", &bad, "--yes"])
        .assert()
        .failure()
        .stderr(contains("Invalid backup"));

    // Nothing was touched.
    ror()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2 order(s)"));
}

#[test]
fn test_log_db_and_config() {
    let db_path = setup_test_db("log_db_config");
    init_db_with_orders(&db_path);

    ror()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("save"))
        .stdout(contains("init"));

    ror()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Schema version"))
        .stdout(contains("Total orders"))
        .stdout(contains("Integrity check passed"));

    ror()
        .args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("default_sort_field"));
}

#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rorders::core::logic::Core;
use rorders::db::pool::OpenOptions;
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a scratch dir so no real config is read.
pub fn ror() -> Command {
    let home = env::temp_dir().join("rorders_test_home");
    fs::create_dir_all(&home).ok();
    let mut cmd = cargo_bin_cmd!("rorders");
    cmd.env("HOME", &home).env("APPDATA", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rorders.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add two orders through the form
pub fn init_db_with_orders(db_path: &str) {
    ror()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ror()
        .args([
            "--db",
            db_path,
            "add",
            "--number",
            "ORD-100",
            "--date",
            "2025-09-01",
            "--bottom",
            "B-7",
            "--material",
            "Steel",
        ])
        .assert()
        .success();

    ror()
        .args([
            "--db",
            db_path,
            "add",
            "--number",
            "ORD-200",
            "--date",
            "2025-09-15",
            "--bottom",
            "B-8",
            "--executor",
            "welder=Ivanov@2025-09-16",
        ])
        .assert()
        .success();
}

/// Open the store directly through the library (no pre-rebuild zip).
pub fn open_core(db_path: &str) -> Core {
    Core::init(
        db_path,
        OpenOptions {
            backup_before_rebuild: false,
        },
    )
    .expect("open store")
}

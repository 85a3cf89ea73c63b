#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Datelike, Local, NaiveDate};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a scratch directory so no real config is read.
pub fn perfpay() -> Command {
    let home = env::temp_dir().join("perfpay_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("perfpay");
    cmd.env("HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_perfpay.sqlite", name));
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

/// Fresh database with the demo data seeded.
pub fn init_db(db_path: &str) {
    perfpay()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Month of the seeded reviews (`YYYY-MM`).
pub fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Month of the seeded salary records (`YYYY-MM`).
pub fn previous_month() -> String {
    let today = Local::now().date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    first.pred_opt().unwrap_or(first).format("%Y-%m").to_string()
}

/// Run a command as `user` against `db`.
pub fn as_user(db: &str, user: &str, args: &[&str]) -> Command {
    let mut cmd = perfpay();
    cmd.args(["--db", db, "--as", user]).args(args);
    cmd
}

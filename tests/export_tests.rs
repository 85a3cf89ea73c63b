use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{as_user, init_db, previous_month, setup_test_db, temp_out};

#[test]
fn test_export_summary_csv_with_totals() {
    let db = setup_test_db("export_summary_csv");
    init_db(&db);
    let out = temp_out("export_summary_csv", "csv");
    let prev = previous_month();

    as_user(
        &db,
        "T1003",
        &["export", "--kind", "summary", "--format", "csv", "--month", &prev, "--file", &out],
    )
    .assert()
    .success()
    .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("csv written");
    let lines: Vec<&str> = content.lines().collect();

    assert!(lines[0].starts_with("Month,Employee No,Name,Entry Date"));
    assert_eq!(lines.len(), 1 + 5 + 3);
    assert!(lines[1].starts_with(&format!("{},T1001,Zhang San", prev.replace('-', ""))));
    assert!(lines[6].contains("Period total"));
    assert!(lines[7].contains("Petty cash adjustment"));
    assert!(lines[8].contains("Grand total"));
}

#[test]
fn test_export_bank_json() {
    let db = setup_test_db("export_bank_json");
    init_db(&db);
    let out = temp_out("export_bank_json", "json");
    let prev = previous_month();

    as_user(
        &db,
        "T1003",
        &["export", "--kind", "bank", "--format", "json", "--month", &prev, "--file", &out],
    )
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("json written");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = v.as_array().expect("array");

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["Seq"], 1);
    assert_eq!(rows[0]["Account Name"], "Zhang San");
    assert_eq!(rows[0]["Memo"], format!("{} salary", &prev[5..]));
}

#[test]
fn test_export_xlsx() {
    let db = setup_test_db("export_summary_xlsx");
    init_db(&db);
    let out = temp_out("export_summary_xlsx", "xlsx");

    as_user(
        &db,
        "T1003",
        &["export", "--format", "xlsx", "--month", &previous_month(), "--file", &out],
    )
    .assert()
    .success();

    assert!(fs::metadata(&out).map(|m| m.len() > 0).unwrap_or(false));
}

#[test]
fn test_export_rules() {
    let db = setup_test_db("export_rules");
    init_db(&db);
    let out = temp_out("export_rules", "csv");
    let prev = previous_month();

    // finance only
    as_user(&db, "T1002", &["export", "--month", &prev, "--file", &out])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    // absolute paths only
    as_user(&db, "T1003", &["export", "--month", &prev, "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));

    // existing file: declined prompt keeps it, --force overwrites
    fs::write(&out, "keep me").unwrap();
    as_user(&db, "T1003", &["export", "--month", &prev, "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    as_user(&db, "T1003", &["export", "--month", &prev, "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Grand total"));
}

#[test]
fn test_export_empty_month_still_has_totals() {
    let db = setup_test_db("export_empty_month");
    init_db(&db);
    let out = temp_out("export_empty_month", "csv");

    as_user(&db, "T1003", &["export", "--month", "2001-01", "--file", &out])
        .assert()
        .success()
        .stdout(contains("No salary records found").and(contains("0 record(s)")));

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 1 + 3);
}

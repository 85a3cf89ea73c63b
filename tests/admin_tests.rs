use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::{as_user, init_db, perfpay, setup_test_db, temp_out};

#[test]
fn test_init_seeds_demo_data() {
    let db = setup_test_db("admin_init");

    perfpay()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    as_user(&db, "T1003", &["employee", "list"])
        .assert()
        .success()
        .stdout(contains("Zhang San").and(contains("Sun Qi")));

    as_user(&db, "T1001", &["whoami"])
        .assert()
        .success()
        .stdout(contains("Zhang San (T1001)").and(contains("T1002 Li Jingli")));
}

#[test]
fn test_employee_add_update_delete() {
    let db = setup_test_db("admin_employee_crud");
    init_db(&db);

    as_user(
        &db,
        "T1002",
        &[
            "employee", "add", "--no", "T2001", "--name", "Zhou Ba", "--phone", "13900000001",
            "--department", "Engineering", "--entry-date", "2026-01-05", "--leader", "2",
            "--base-salary", "9000", "--performance-base", "5000",
        ],
    )
    .assert()
    .success()
    .stdout(contains("Employee #8 added: Zhou Ba (T2001)"));

    as_user(&db, "T1002", &["employee", "add", "--no", "T2002", "--name", "X", "--phone", " "])
        .assert()
        .failure()
        .stderr(contains("phone is required"));

    as_user(&db, "T1003", &["employee", "update", "--id", "8", "--base-salary", "9500"])
        .assert()
        .success();

    as_user(&db, "T1003", &["employee", "list", "--search", "zhou"])
        .assert()
        .success()
        .stdout(contains("9,500").and(contains("Zhang San").not()));

    as_user(&db, "T1001", &["employee", "del", "--id", "8"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    as_user(&db, "T1003", &["employee", "del", "--id", "8"])
        .assert()
        .success()
        .stdout(contains("Employee #8 deleted"));
}

#[test]
fn test_oversized_salary_is_rejected_before_payroll() {
    let db = setup_test_db("admin_employee_huge_pay");
    init_db(&db);

    as_user(
        &db,
        "T1003",
        &[
            "employee", "add", "--no", "T2009", "--name", "Big Pay", "--phone", "13900000009",
            "--base-salary", "9223372036854775807", "--performance-base", "5000",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("Invalid input").and(contains("base salary")));

    as_user(&db, "T1003", &["employee", "update", "--id", "1", "--base-salary", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(contains("Invalid input"));

    as_user(&db, "T1003", &["salary", "generate"])
        .assert()
        .success();
}

#[test]
fn test_log_records_operations() {
    let db = setup_test_db("admin_log");
    init_db(&db);

    as_user(&db, "T1006", &["perf", "self", "--score", "70", "--comment", "ok"])
        .assert()
        .success();

    perfpay()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("init"))
                .and(contains("self_submit")),
        );
}

#[test]
fn test_db_info_and_check() {
    let db = setup_test_db("admin_db_info");
    init_db(&db);

    perfpay()
        .args(["--db", &db, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(
            contains("employees")
                .and(contains("performances"))
                .and(contains("Integrity check passed")),
        );
}

#[test]
fn test_backup_plain_and_compressed() {
    let db = setup_test_db("admin_backup");
    init_db(&db);
    let out = temp_out("admin_backup", "sqlite");
    let zipped = temp_out("admin_backup", "zip");

    perfpay()
        .args(["--db", &db, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&out).exists());

    perfpay()
        .args(["--db", &db, "backup", "--file", &out, "--compress"])
        .assert()
        .success();
    assert!(Path::new(&zipped).exists());
}

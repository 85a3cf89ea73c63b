use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{as_user, current_month, init_db, previous_month, setup_test_db};

#[test]
fn test_generate_requires_finance() {
    let db = setup_test_db("payroll_forbidden");
    init_db(&db);

    for user in ["T1001", "T1002"] {
        as_user(&db, user, &["salary", "generate"])
            .assert()
            .failure()
            .stderr(contains("Permission denied"));
    }
}

#[test]
fn test_generate_from_completed_reviews() {
    let db = setup_test_db("payroll_generate");
    init_db(&db);
    let month = current_month();

    as_user(&db, "T1003", &["salary", "generate", "--month", &month])
        .assert()
        .success()
        .stdout(
            contains("2 created, 3 skipped")
                .and(contains("Skipped T1005: review not completed")),
        );

    // nothing is recalculated on a second run
    as_user(&db, "T1003", &["salary", "generate", "--month", &month])
        .assert()
        .success()
        .stdout(contains("0 created, 5 skipped").and(contains("already generated")));

    as_user(&db, "T1003", &["salary", "list", "--month", &month])
        .assert()
        .success()
        .stdout(contains("draft").and(contains("Records      : 2")));
}

#[test]
fn test_salary_visibility() {
    let db = setup_test_db("payroll_visibility");
    init_db(&db);
    let prev = previous_month();

    as_user(&db, "T1004", &["salary", "list"])
        .assert()
        .success()
        .stdout(contains("Li Si").and(contains("Zhang San").not()));

    as_user(&db, "T1004", &["salary", "show", "--month", &prev])
        .assert()
        .success()
        .stdout(contains("Net salary").and(contains("13,476")));

    as_user(&db, "T1004", &["salary", "show", "--employee", "T1001", "--month", &prev])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    as_user(&db, "T1003", &["salary", "show", "--employee", "T1001", "--month", &prev])
        .assert()
        .success()
        .stdout(contains("12,250"));
}

#[test]
fn test_invalid_month_is_rejected() {
    let db = setup_test_db("payroll_invalid_month");
    init_db(&db);

    as_user(&db, "T1003", &["salary", "generate", "--month", "2026-13"])
        .assert()
        .failure();
}

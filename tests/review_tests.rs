use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{as_user, current_month, init_db, setup_test_db};

#[test]
fn test_self_assessment_submit_then_illegal_resubmit() {
    let db = setup_test_db("review_self_submit");
    init_db(&db);

    // Zhao Liu has not started the seeded review yet
    as_user(&db, "T1006", &["perf", "self", "--score", "92", "--comment", "Shipped the API"])
        .assert()
        .success()
        .stdout(contains("Self-assessment submitted"));

    as_user(&db, "T1006", &["perf", "self", "--score", "95", "--comment", "Again"])
        .assert()
        .failure()
        .stderr(contains("Illegal transition"));
}

#[test]
fn test_self_assessment_validation() {
    let db = setup_test_db("review_self_validation");
    init_db(&db);

    as_user(&db, "T1007", &["perf", "self", "--score", "150", "--comment", "x"])
        .assert()
        .failure()
        .stderr(contains("score must be between 0 and 100"));

    as_user(&db, "T1007", &["perf", "self", "--score", "-1", "--comment", "x"])
        .assert()
        .failure()
        .stderr(contains("score must be between 0 and 100"));

    as_user(&db, "T1007", &["perf", "self", "--score", "80", "--comment", "   "])
        .assert()
        .failure()
        .stderr(contains("comment must not be empty"));

    // a draft may be saved without a comment and stays pending
    as_user(&db, "T1007", &["perf", "self", "--score", "80", "--draft"])
        .assert()
        .success()
        .stdout(contains("draft saved"));

    as_user(&db, "T1007", &["perf", "list"])
        .assert()
        .success()
        .stdout(contains("Awaiting self-assessment"));
}

#[test]
fn test_leader_assess_requires_leader() {
    let db = setup_test_db("review_leader_assess");
    init_db(&db);

    // review #3 (Wang Wu) is waiting for the leader in the seed data
    as_user(&db, "T1001", &["perf", "assess", "--id", "3", "--score", "80"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    as_user(&db, "T1002", &["perf", "assess", "--id", "3", "--score", "80", "--comment", "Solid"])
        .assert()
        .success()
        .stdout(contains("Review #3 completed with score 80"));

    as_user(&db, "T1002", &["perf", "assess", "--id", "3", "--score", "90"])
        .assert()
        .failure()
        .stderr(contains("Illegal transition"));

    as_user(&db, "T1002", &["perf", "assess", "--id", "42", "--score", "90"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_batch_approve_completes_month() {
    let db = setup_test_db("review_batch");
    init_db(&db);
    let month = current_month();

    for user in ["T1006", "T1007"] {
        as_user(&db, user, &["perf", "self", "--score", "85", "--comment", "Steady month"])
            .assert()
            .success();
    }

    as_user(&db, "T1002", &["perf", "stage", "--id", "4", "--score", "91"])
        .assert()
        .success();

    as_user(&db, "T1002", &["perf", "batch", "--month", &month])
        .assert()
        .success()
        .stdout(
            contains("Review #3 approved")
                .and(contains("Review #4 approved"))
                .and(contains("Review #5 approved")),
        );

    as_user(&db, "T1002", &["perf", "summary", "--month", &month])
        .assert()
        .success()
        .stdout(contains("Completed      : 5").and(contains("Pending leader : 0")));

    as_user(&db, "T1002", &["perf", "show", "--id", "4"])
        .assert()
        .success()
        .stdout(contains("Leader score   : 91").and(contains("Good performance, keep it up.")));
}

#[test]
fn test_staged_score_stays_out_of_the_assessment() {
    let db = setup_test_db("review_stage_pending");
    init_db(&db);
    let month = current_month();

    as_user(&db, "T1002", &["perf", "stage", "--id", "3", "--score", "10", "--comment", "meh"])
        .assert()
        .success()
        .stdout(contains("Leader score 10 staged for review #3"));

    as_user(&db, "T1002", &["perf", "show", "--id", "3"])
        .assert()
        .success()
        .stdout(
            contains("Leader score   : --")
                .and(contains("Staged score   : 10"))
                .and(contains("Awaiting leader")),
        );

    as_user(&db, "T1002", &["perf", "summary", "--month", &month])
        .assert()
        .success()
        .stdout(contains("Pending leader : 1").and(contains("Avg. leader    : 86.5")));
}

#[test]
fn test_batch_reports_wrong_state_but_approves_the_rest() {
    let db = setup_test_db("review_batch_partial");
    init_db(&db);
    let month = current_month();

    // #1 is already completed, #3 is pending
    as_user(&db, "T1002", &["perf", "batch", "--month", &month, "--ids", "1,3"])
        .assert()
        .failure()
        .stdout(contains("Review #3 approved"))
        .stderr(contains("Review #1").and(contains("Illegal transition")));
}

#[test]
fn test_employees_only_list_their_own_reviews() {
    let db = setup_test_db("review_list_scope");
    init_db(&db);

    as_user(&db, "T1001", &["perf", "list"])
        .assert()
        .success()
        .stdout(contains("Zhang San").and(contains("Li Si").not()));

    as_user(&db, "T1002", &["perf", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(contains("Zhang San").and(contains("Li Si")).and(contains("Wang Wu").not()));
}

#[test]
fn test_missing_session_is_an_error() {
    let db = setup_test_db("review_no_session");
    init_db(&db);

    common::perfpay()
        .args(["--db", &db, "perf", "list"])
        .assert()
        .failure()
        .stderr(contains("--as"));

    as_user(&db, "T9999", &["perf", "list"])
        .assert()
        .failure()
        .stderr(contains("no employee matches"));
}

//! Review lifecycle: `pending_self` → `pending_leader` → `completed`.
//!
//! Every transition validates first and mutates last, so a failed call
//! leaves the record exactly as it was.

use crate::errors::{AppError, AppResult};
use crate::models::{PerformanceRecord, PerformanceStatus, Score};
use chrono::NaiveDateTime;

fn expect_status(
    record: &PerformanceRecord,
    expected: PerformanceStatus,
    action: &str,
) -> AppResult<()> {
    if record.status != expected {
        return Err(AppError::illegal(record.status, action));
    }
    Ok(())
}

fn clean_comment(comment: &str) -> Option<String> {
    let c = comment.trim();
    if c.is_empty() { None } else { Some(c.to_string()) }
}

/// Store a self-assessment without submitting it.
pub fn save_self_draft(record: &mut PerformanceRecord, score: i64, comment: &str) -> AppResult<()> {
    expect_status(record, PerformanceStatus::PendingSelf, "save a self-assessment draft")?;
    let score = Score::new(score)?;

    record.self_score = Some(score);
    record.self_comment = clean_comment(comment);
    Ok(())
}

pub fn submit_self_assessment(
    record: &mut PerformanceRecord,
    score: i64,
    comment: &str,
    at: NaiveDateTime,
) -> AppResult<()> {
    expect_status(record, PerformanceStatus::PendingSelf, "submit a self-assessment")?;
    let score = Score::new(score)?;
    let comment = clean_comment(comment)
        .ok_or_else(|| AppError::invalid("self-assessment comment must not be empty"))?;

    record.self_score = Some(score);
    record.self_comment = Some(comment);
    record.self_submitted_at = Some(at);
    record.status = PerformanceStatus::PendingLeader;
    Ok(())
}

/// Stage a leader score/comment without completing the review.
///
/// Staged values live beside the assessment: `leader_score` stays empty
/// until the review is completed.
pub fn set_leader_draft(
    record: &mut PerformanceRecord,
    score: i64,
    comment: &str,
) -> AppResult<()> {
    expect_status(record, PerformanceStatus::PendingLeader, "stage a leader assessment")?;
    let score = Score::new(score)?;

    record.staged_leader_score = Some(score);
    record.staged_leader_comment = clean_comment(comment);
    Ok(())
}

pub fn submit_leader_assessment(
    record: &mut PerformanceRecord,
    leader_id: u32,
    score: i64,
    comment: &str,
    at: NaiveDateTime,
) -> AppResult<()> {
    expect_status(record, PerformanceStatus::PendingLeader, "submit a leader assessment")?;
    let score = Score::new(score)?;

    record.leader_score = Some(score);
    record.leader_comment = clean_comment(comment);
    record.leader_id = Some(leader_id);
    record.leader_assessed_at = Some(at);
    record.staged_leader_score = None;
    record.staged_leader_comment = None;
    record.status = PerformanceStatus::Completed;
    Ok(())
}

/// Result of a batch approval, by record id.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub approved: Vec<u32>,
    pub failed: Vec<(u32, AppError)>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Complete every given record, defaulting the score to the staged leader
/// score (else the self score) and the comment to `default_comment`.
///
/// Records are handled independently: one failure does not stop the rest.
pub fn batch_approve(
    records: &mut [PerformanceRecord],
    leader_id: u32,
    default_comment: &str,
    at: NaiveDateTime,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for record in records.iter_mut() {
        let result = match record.effective_score() {
            _ if record.status != PerformanceStatus::PendingLeader => {
                Err(AppError::illegal(record.status, "approve"))
            }
            Some(score) => {
                let comment = record
                    .staged_leader_comment
                    .clone()
                    .unwrap_or_else(|| default_comment.to_string());
                submit_leader_assessment(record, leader_id, score.percent(), &comment, at)
            }
            None => Err(AppError::invalid(format!(
                "record {} has neither a leader nor a self score",
                record.id
            ))),
        };

        match result {
            Ok(()) => outcome.approved.push(record.id),
            Err(e) => outcome.failed.push((record.id, e)),
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn fresh(id: u32) -> PerformanceRecord {
        PerformanceRecord::new(id, 10 + id, YearMonth::new(2026, 2).unwrap())
    }

    fn pending_leader(id: u32, self_score: i64) -> PerformanceRecord {
        let mut r = fresh(id);
        submit_self_assessment(&mut r, self_score, "done my best", at(9)).unwrap();
        r
    }

    #[test]
    fn self_submission_moves_to_pending_leader() {
        let mut r = fresh(1);
        submit_self_assessment(&mut r, 85, "  shipped v2  ", at(10)).unwrap();

        assert_eq!(r.status, PerformanceStatus::PendingLeader);
        assert_eq!(r.self_score.unwrap().value(), 85);
        assert_eq!(r.self_comment.as_deref(), Some("shipped v2"));
        assert_eq!(r.self_submitted_at, Some(at(10)));
    }

    #[test]
    fn draft_keeps_pending_self() {
        let mut r = fresh(1);
        save_self_draft(&mut r, 70, "").unwrap();

        assert_eq!(r.status, PerformanceStatus::PendingSelf);
        assert_eq!(r.self_score.unwrap().value(), 70);
        assert!(r.self_comment.is_none());
        assert!(r.self_submitted_at.is_none());

        // drafts can be overwritten, then submitted
        save_self_draft(&mut r, 75, "half way").unwrap();
        submit_self_assessment(&mut r, 80, "finished", at(11)).unwrap();
        assert_eq!(r.self_score.unwrap().value(), 80);
    }

    #[test]
    fn self_submission_validates_input() {
        let mut r = fresh(1);
        let before = r.clone();

        assert!(matches!(
            submit_self_assessment(&mut r, 101, "ok", at(10)),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            submit_self_assessment(&mut r, 50, "   ", at(10)),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(r, before);
    }

    #[test]
    fn self_submission_from_pending_leader_is_illegal() {
        let mut r = pending_leader(1, 85);
        let before = r.clone();

        let err = submit_self_assessment(&mut r, 90, "again", at(12)).unwrap_err();
        assert!(matches!(err, AppError::IllegalTransition { .. }));
        assert_eq!(r, before);

        assert!(save_self_draft(&mut r, 90, "again").is_err());
        assert_eq!(r, before);
    }

    #[test]
    fn leader_submission_completes_record() {
        let mut r = pending_leader(1, 85);
        submit_leader_assessment(&mut r, 2, 88, "solid month", at(15)).unwrap();

        assert_eq!(r.status, PerformanceStatus::Completed);
        assert_eq!(r.leader_score.unwrap().value(), 88);
        assert_eq!(r.leader_id, Some(2));
        assert_eq!(r.leader_assessed_at, Some(at(15)));
    }

    #[test]
    fn leader_submission_requires_pending_leader() {
        let mut r = fresh(1);
        let err = submit_leader_assessment(&mut r, 2, 88, "", at(15)).unwrap_err();
        assert!(matches!(err, AppError::IllegalTransition { .. }));
        assert_eq!(r.status, PerformanceStatus::PendingSelf);
    }

    #[test]
    fn second_leader_submission_fails_and_keeps_first() {
        let mut r = pending_leader(1, 85);
        submit_leader_assessment(&mut r, 2, 88, "first", at(15)).unwrap();

        let err = submit_leader_assessment(&mut r, 2, 40, "second", at(16)).unwrap_err();
        assert!(matches!(err, AppError::IllegalTransition { .. }));
        assert_eq!(r.leader_score.unwrap().value(), 88);
        assert_eq!(r.leader_comment.as_deref(), Some("first"));
        assert_eq!(r.leader_assessed_at, Some(at(15)));
    }

    fn assert_score_invariants(r: &PerformanceRecord) {
        if r.leader_score.is_some() {
            assert_eq!(r.status, PerformanceStatus::Completed);
        }
        if r.self_submitted_at.is_some() {
            assert_ne!(r.status, PerformanceStatus::PendingSelf);
        }
    }

    #[test]
    fn status_rank_never_decreases() {
        let mut r = fresh(1);
        let mut last = r.status.rank();

        // (step, whether it is a legal transition from the state reached so far)
        let steps: [(fn(&mut PerformanceRecord) -> AppResult<()>, bool); 9] = [
            (|r| save_self_draft(r, 60, "draft"), true),
            (|r| submit_leader_assessment(r, 2, 70, "", at(8)), false),
            (|r| submit_self_assessment(r, 60, "go", at(9)), true),
            (|r| save_self_draft(r, 10, "late"), false),
            (|r| set_leader_draft(r, 75, "staged"), true),
            (|r| submit_self_assessment(r, 60, "go", at(9)), false),
            (|r| submit_leader_assessment(r, 2, 75, "", at(10)), true),
            (|r| set_leader_draft(r, 10, "late"), false),
            (|r| submit_self_assessment(r, 60, "go", at(11)), false),
        ];

        for (i, (step, legal)) in steps.into_iter().enumerate() {
            let before = r.clone();
            let result = step(&mut r);
            if legal {
                assert!(result.is_ok(), "step {i} should succeed: {result:?}");
            } else {
                assert!(
                    matches!(result, Err(AppError::IllegalTransition { .. })),
                    "step {i} should be illegal: {result:?}"
                );
                assert_eq!(r, before);
            }
            assert!(r.status.rank() >= last);
            assert_score_invariants(&r);
            last = r.status.rank();
        }
        assert_eq!(r.status, PerformanceStatus::Completed);
        assert_eq!(r.leader_score.unwrap().value(), 75);
    }

    #[test]
    fn staged_score_is_not_a_leader_score() {
        let mut r = pending_leader(1, 85);
        set_leader_draft(&mut r, 10, "meh").unwrap();

        assert_eq!(r.status, PerformanceStatus::PendingLeader);
        assert!(r.leader_score.is_none());
        assert!(r.leader_comment.is_none());
        assert_eq!(r.staged_leader_score.unwrap().value(), 10);
        assert_eq!(r.effective_score().unwrap().value(), 10);
        assert_score_invariants(&r);

        // a direct assessment wins over the staged values and clears them
        submit_leader_assessment(&mut r, 2, 90, "final", at(15)).unwrap();
        assert_eq!(r.leader_score.unwrap().value(), 90);
        assert_eq!(r.leader_comment.as_deref(), Some("final"));
        assert!(r.staged_leader_score.is_none());
        assert!(r.staged_leader_comment.is_none());
        assert_score_invariants(&r);
    }

    #[test]
    fn batch_approve_defaults_score_and_comment() {
        let mut a = pending_leader(1, 85);
        set_leader_draft(&mut a, 88, "great work").unwrap();
        let mut b = pending_leader(2, 90);
        set_leader_draft(&mut b, 92, "").unwrap();
        let c = pending_leader(3, 75);

        let mut records = vec![a, b, c];
        let outcome = batch_approve(&mut records, 2, "Good, keep it up.", at(16));

        assert!(outcome.is_clean());
        assert_eq!(outcome.approved, vec![1, 2, 3]);
        assert!(
            records
                .iter()
                .all(|r| r.status == PerformanceStatus::Completed)
        );

        assert_eq!(records[0].leader_score.unwrap().value(), 88);
        assert_eq!(records[0].leader_comment.as_deref(), Some("great work"));
        assert_eq!(records[1].leader_score.unwrap().value(), 92);
        assert_eq!(
            records[1].leader_comment.as_deref(),
            Some("Good, keep it up.")
        );
        assert_eq!(records[2].leader_score.unwrap().value(), 75);
        assert_eq!(
            records[2].leader_comment.as_deref(),
            Some("Good, keep it up.")
        );
        assert!(records.iter().all(|r| r.leader_id == Some(2)));
        assert!(records.iter().all(|r| r.staged_leader_score.is_none()));
    }

    #[test]
    fn batch_approve_isolates_failures() {
        let ok = pending_leader(1, 80);
        let wrong_state = fresh(2);
        let mut no_score = fresh(3);
        // force pending_leader without any score
        no_score.status = PerformanceStatus::PendingLeader;

        let mut records = vec![wrong_state, ok, no_score];
        let outcome = batch_approve(&mut records, 2, "fine", at(16));

        assert_eq!(outcome.approved, vec![1]);
        assert_eq!(outcome.failed.len(), 2);
        assert!(matches!(
            outcome.failed[0],
            (2, AppError::IllegalTransition { .. })
        ));
        assert!(matches!(outcome.failed[1], (3, AppError::InvalidInput(_))));

        assert_eq!(records[0].status, PerformanceStatus::PendingSelf);
        assert_eq!(records[1].status, PerformanceStatus::Completed);
        assert_eq!(records[2].status, PerformanceStatus::PendingLeader);
        assert!(records[2].leader_id.is_none());
    }
}

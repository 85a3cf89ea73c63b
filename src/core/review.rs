use crate::core::workflow::{self, BatchOutcome};
use crate::db::repo::{Repository, next_id};
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{PerformanceRecord, PerformanceStatus, Role, Session, YearMonth};
use chrono::NaiveDateTime;

/// High-level business logic for the review commands.
pub struct ReviewLogic;

/// What the self-assessment command should do with the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfAction {
    SaveDraft,
    Submit,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MonthSummary {
    pub total: usize,
    pub pending_self: usize,
    pub pending_leader: usize,
    pub completed: usize,
    pub average_leader_score: Option<f64>,
}

impl ReviewLogic {
    /// Save or submit the session user's own review for `month`.
    /// The record is created on first save.
    pub fn self_assess<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        month: YearMonth,
        score: i64,
        comment: &str,
        action: SelfAction,
        now: NaiveDateTime,
    ) -> AppResult<PerformanceRecord> {
        let mut list = repo.performances()?;

        let idx = match list.iter().position(|p| p.is_key(session.user_id, month)) {
            Some(i) => i,
            None => {
                let id = next_id(&list, |p| p.id);
                list.push(PerformanceRecord::new(id, session.user_id, month));
                list.len() - 1
            }
        };

        let record = &mut list[idx];
        match action {
            SelfAction::SaveDraft => workflow::save_self_draft(record, score, comment)?,
            SelfAction::Submit => workflow::submit_self_assessment(record, score, comment, now)?,
        }
        let saved = record.clone();

        repo.save_performances(&list)?;

        let op = match action {
            SelfAction::SaveDraft => "self_draft",
            SelfAction::Submit => "self_submit",
        };
        repo.audit(
            op,
            &format!("perf#{}", saved.id),
            &format!("{} scored {} for {}", session.employee_no, score, month),
        );

        Ok(saved)
    }

    /// Complete a review as leader.
    pub fn leader_assess<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        record_id: u32,
        score: i64,
        comment: &str,
        now: NaiveDateTime,
    ) -> AppResult<PerformanceRecord> {
        session.require_role(&[Role::Leader])?;

        let mut list = repo.performances()?;
        let record = list
            .iter_mut()
            .find(|p| p.id == record_id)
            .ok_or_else(|| AppError::not_found(format!("performance record #{record_id}")))?;

        workflow::submit_leader_assessment(record, session.user_id, score, comment, now)?;
        let saved = record.clone();

        repo.save_performances(&list)?;
        repo.audit(
            "leader_assess",
            &format!("perf#{record_id}"),
            &format!("{} scored {}", session.employee_no, score),
        );

        Ok(saved)
    }

    /// Stage a leader score without completing the review.
    pub fn leader_stage<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        record_id: u32,
        score: i64,
        comment: &str,
    ) -> AppResult<PerformanceRecord> {
        session.require_role(&[Role::Leader])?;

        let mut list = repo.performances()?;
        let record = list
            .iter_mut()
            .find(|p| p.id == record_id)
            .ok_or_else(|| AppError::not_found(format!("performance record #{record_id}")))?;

        workflow::set_leader_draft(record, score, comment)?;
        let saved = record.clone();

        repo.save_performances(&list)?;
        repo.audit(
            "leader_stage",
            &format!("perf#{record_id}"),
            &format!("{} staged {}", session.employee_no, score),
        );

        Ok(saved)
    }

    /// Approve the given records, or every `pending_leader` record of `month`
    /// when `ids` is empty.
    pub fn batch_approve<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        month: YearMonth,
        ids: &[u32],
        default_comment: &str,
        now: NaiveDateTime,
    ) -> AppResult<BatchOutcome> {
        session.require_role(&[Role::Leader])?;

        let mut list = repo.performances()?;
        let mut missing = Vec::new();

        let mut selected: Vec<PerformanceRecord> = if ids.is_empty() {
            list.iter()
                .filter(|p| p.year_month == month && p.status == PerformanceStatus::PendingLeader)
                .cloned()
                .collect()
        } else {
            let mut wanted = ids.to_vec();
            wanted.sort_unstable();
            wanted.dedup();

            let mut out = Vec::new();
            for id in &wanted {
                match list.iter().find(|p| p.id == *id) {
                    Some(p) => out.push(p.clone()),
                    None => missing.push(*id),
                }
            }
            out
        };

        let mut outcome =
            workflow::batch_approve(&mut selected, session.user_id, default_comment, now);

        for id in missing {
            outcome
                .failed
                .push((id, AppError::not_found(format!("performance record #{id}"))));
        }

        if !outcome.approved.is_empty() {
            for done in selected.into_iter().filter(|p| outcome.approved.contains(&p.id)) {
                if let Some(slot) = list.iter_mut().find(|p| p.id == done.id) {
                    *slot = done;
                }
            }
            repo.save_performances(&list)?;
            repo.audit(
                "batch_approve",
                &month.to_string(),
                &format!(
                    "{} approved {} record(s), {} failed",
                    session.employee_no,
                    outcome.approved.len(),
                    outcome.failed.len()
                ),
            );
        }

        Ok(outcome)
    }

    /// Reviews visible to the session user: their own, or everyone's for
    /// leaders and finance.
    pub fn list<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        month: Option<YearMonth>,
        status: Option<PerformanceStatus>,
    ) -> AppResult<Vec<PerformanceRecord>> {
        let see_all = session.has_role(&[Role::Leader, Role::Finance]);

        let mut out: Vec<PerformanceRecord> = repo
            .performances()?
            .into_iter()
            .filter(|p| see_all || p.employee_id == session.user_id)
            .filter(|p| month.is_none_or(|m| p.year_month == m))
            .filter(|p| status.is_none_or(|s| p.status == s))
            .collect();

        out.sort_by(|a, b| {
            b.year_month
                .cmp(&a.year_month)
                .then(a.employee_id.cmp(&b.employee_id))
        });
        Ok(out)
    }

    /// A single review, if the session user may see it.
    pub fn show<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        record_id: u32,
    ) -> AppResult<PerformanceRecord> {
        let record = repo.find_performance(record_id)?;
        if record.employee_id != session.user_id {
            session.require_role(&[Role::Leader, Role::Finance])?;
        }
        Ok(record)
    }

    /// Status counts for `month`; the average covers completed reviews only.
    pub fn summarize(records: &[PerformanceRecord], month: YearMonth) -> MonthSummary {
        let mut s = MonthSummary::default();
        let mut score_sum = 0i64;
        let mut scored = 0i64;

        for r in records.iter().filter(|r| r.year_month == month) {
            s.total += 1;
            match r.status {
                PerformanceStatus::PendingSelf => s.pending_self += 1,
                PerformanceStatus::PendingLeader => s.pending_leader += 1,
                PerformanceStatus::Completed => {
                    s.completed += 1;
                    if let Some(score) = r.leader_score {
                        score_sum += score.percent();
                        scored += 1;
                    }
                }
            }
        }

        if scored > 0 {
            s.average_leader_score = Some(score_sum as f64 / scored as f64);
        }
        s
    }
}

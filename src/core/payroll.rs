use crate::core::calculator::{PayrollPolicy, salary_record};
use crate::db::repo::{Repository, next_id};
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::models::{
    PerformanceStatus, Role, SalaryRecord, SalaryStatus, Session, YearMonth,
};
use chrono::Datelike;

pub struct PayrollLogic;

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub created: Vec<SalaryRecord>,
    /// `(employee_no, reason)`
    pub skipped: Vec<(String, String)>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SalaryTotals {
    pub count: usize,
    pub total_net: i64,
    pub total_tax: i64,
    pub average_leader_score: Option<f64>,
}

impl PayrollLogic {
    /// Create draft salary records for `month` from completed reviews.
    ///
    /// Existing records are never recalculated.
    pub fn generate<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        month: YearMonth,
        policy: &PayrollPolicy,
    ) -> AppResult<GenerateReport> {
        session.require_role(&[Role::Finance])?;
        policy.validate()?;

        let employees = repo.employees()?;
        let performances = repo.performances()?;
        let mut salaries = repo.salaries()?;
        let mut report = GenerateReport::default();

        let month_end = month
            .first_day()
            .with_day(month.days_in_month())
            .unwrap_or(month.first_day());

        for emp in employees
            .iter()
            .filter(|e| e.role == Role::Employee && e.is_active())
        {
            let skip = |reason: &str| (emp.employee_no.clone(), reason.to_string());

            if salaries.iter().any(|s| s.is_key(emp.id, month)) {
                report.skipped.push(skip("already generated"));
                continue;
            }
            if emp.entry_date > month_end {
                report.skipped.push(skip("not employed in this month"));
                continue;
            }
            if !emp.has_compensation() {
                report.skipped.push(skip("no compensation configured"));
                continue;
            }

            let review = performances.iter().find(|p| p.is_key(emp.id, month));
            let Some(review) = review.filter(|p| p.status == PerformanceStatus::Completed) else {
                report.skipped.push(skip("review not completed"));
                continue;
            };
            let Some(leader_score) = review.leader_score else {
                report.skipped.push(skip("review has no leader score"));
                continue;
            };

            let record = salary_record(
                next_id(&salaries, |s| s.id),
                emp,
                month,
                review.self_score,
                leader_score,
                SalaryStatus::Draft,
                policy,
            )?;

            salaries.push(record.clone());
            report.created.push(record);
        }

        if !report.created.is_empty() {
            repo.save_salaries(&salaries)?;
            repo.audit(
                "salary_generate",
                &month.to_string(),
                &format!(
                    "{} generated {} salary record(s)",
                    session.employee_no,
                    report.created.len()
                ),
            );
        }

        Ok(report)
    }

    /// Salary records visible to the session user: all of them for finance,
    /// otherwise only their own.
    pub fn list<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        month: Option<YearMonth>,
    ) -> AppResult<Vec<SalaryRecord>> {
        let see_all = session.has_role(&[Role::Finance]);

        let mut out: Vec<SalaryRecord> = repo
            .salaries()?
            .into_iter()
            .filter(|s| see_all || s.employee_id == session.user_id)
            .filter(|s| month.is_none_or(|m| s.year_month == m))
            .collect();

        out.sort_by(|a, b| {
            b.year_month
                .cmp(&a.year_month)
                .then(a.employee_id.cmp(&b.employee_id))
        });
        Ok(out)
    }

    /// One salary record; only finance may look at someone else's.
    pub fn show<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        employee_id: u32,
        month: YearMonth,
    ) -> AppResult<SalaryRecord> {
        if employee_id != session.user_id {
            session.require_role(&[Role::Finance])?;
        }
        repo.find_salary(employee_id, month)
    }

    pub fn totals(records: &[SalaryRecord]) -> SalaryTotals {
        let count = records.len();
        let total_net = records.iter().map(|s| s.net_salary).sum();
        let total_tax = records.iter().map(|s| s.tax_amount).sum();
        let average_leader_score = if count > 0 {
            let sum: i64 = records.iter().map(|s| s.leader_score.percent()).sum();
            Some(sum as f64 / count as f64)
        } else {
            None
        };

        SalaryTotals {
            count,
            total_net,
            total_tax,
            average_leader_score,
        }
    }
}

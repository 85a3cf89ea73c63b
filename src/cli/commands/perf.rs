use crate::cli::commands::{month_or_current, open_repo, session};
use crate::cli::parser::{Cli, Commands, PerfCmd};
use crate::config::Config;
use crate::core::review::{ReviewLogic, SelfAction};
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, PerformanceRecord, PerformanceStatus};
use crate::ui::messages::{error, field, header, info, success, warning};
use crate::utils::colors::{RESET, color_for_review, colorize_optional};
use crate::utils::formatting::{opt_score, truncate};
use crate::utils::table::{Column, Table};
use chrono::{Local, NaiveDateTime};

fn employee_label(employees: &[Employee], id: u32) -> String {
    employees
        .iter()
        .find(|e| e.id == id)
        .map(|e| format!("{} {}", e.employee_no, e.name))
        .unwrap_or_else(|| format!("#{id}"))
}

fn status_cell(status: PerformanceStatus) -> String {
    format!("{}{}{RESET}", color_for_review(status), status.label())
}

fn print_records(records: &[PerformanceRecord], employees: &[Employee], cfg: &Config) {
    let mut table = Table::new(
        vec![
            Column::right("ID"),
            Column::left("Month"),
            Column::left("Employee"),
            Column::right("Self"),
            Column::right("Leader"),
            Column::left("Status"),
            Column::left("Comment"),
        ],
        &cfg.separator_char,
    );

    for r in records {
        let comment = r
            .leader_comment
            .as_deref()
            .or(r.self_comment.as_deref())
            .unwrap_or("");
        table.add_row(vec![
            r.id.to_string(),
            r.year_month.to_string(),
            employee_label(employees, r.employee_id),
            colorize_optional(&opt_score(r.self_score)),
            colorize_optional(&opt_score(r.leader_score)),
            status_cell(r.status),
            truncate(comment, 40),
        ]);
    }

    table.print();
}

fn stamp(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

fn print_detail(r: &PerformanceRecord, employees: &[Employee]) {
    const W: usize = 15;

    header(format!("Review #{} ({})", r.id, r.year_month));
    field("Employee", W, employee_label(employees, r.employee_id));
    field("Status", W, status_cell(r.status));
    field("Self score", W, opt_score(r.self_score));
    field("Self comment", W, r.self_comment.as_deref().unwrap_or("--"));
    field("Submitted at", W, stamp(r.self_submitted_at));
    field("Leader score", W, opt_score(r.leader_score));
    field("Leader comment", W, r.leader_comment.as_deref().unwrap_or("--"));
    field(
        "Assessed by",
        W,
        r.leader_id
            .map(|id| employee_label(employees, id))
            .unwrap_or_else(|| "--".to_string()),
    );
    field("Assessed at", W, stamp(r.leader_assessed_at));
    if r.staged_leader_score.is_some() {
        field("Staged score", W, opt_score(r.staged_leader_score));
        field(
            "Staged comment",
            W,
            r.staged_leader_comment.as_deref().unwrap_or("--"),
        );
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Perf(cmd) = &cli.command else {
        return Ok(());
    };

    let mut repo = open_repo(cfg)?;
    let me = session(&mut repo, cli)?;
    let now = Local::now().naive_local();

    match cmd {
        PerfCmd::SelfAssess {
            month,
            score,
            comment,
            draft,
        } => {
            let action = if *draft {
                SelfAction::SaveDraft
            } else {
                SelfAction::Submit
            };
            let month = month_or_current(month);
            let r = ReviewLogic::self_assess(&mut repo, &me, month, *score, comment, action, now)?;

            match action {
                SelfAction::SaveDraft => {
                    success(format!("Self-assessment draft saved (review #{}, {month}).", r.id))
                }
                SelfAction::Submit => success(format!(
                    "Self-assessment submitted (review #{}, {month}); waiting for your leader.",
                    r.id
                )),
            }
        }

        PerfCmd::Assess { id, score, comment } => {
            let r = ReviewLogic::leader_assess(&mut repo, &me, *id, *score, comment, now)?;
            success(format!(
                "Review #{} completed with score {}.",
                r.id,
                opt_score(r.leader_score)
            ));
        }

        PerfCmd::Stage { id, score, comment } => {
            let r = ReviewLogic::leader_stage(&mut repo, &me, *id, *score, comment)?;
            success(format!(
                "Leader score {} staged for review #{}.",
                opt_score(r.staged_leader_score),
                r.id
            ));
        }

        PerfCmd::Batch {
            month,
            ids,
            comment,
        } => {
            let month = month_or_current(month);
            let default_comment = comment.as_deref().unwrap_or(&cfg.default_leader_comment);
            let outcome =
                ReviewLogic::batch_approve(&mut repo, &me, month, ids, default_comment, now)?;

            if outcome.approved.is_empty() && outcome.failed.is_empty() {
                info(format!("No reviews pending approval for {month}."));
                return Ok(());
            }

            for id in &outcome.approved {
                success(format!("Review #{id} approved."));
            }
            for (id, e) in &outcome.failed {
                error(format!("Review #{id}: {e}"));
            }

            if !outcome.is_clean() {
                return Err(AppError::invalid(format!(
                    "{} of {} review(s) could not be approved",
                    outcome.failed.len(),
                    outcome.failed.len() + outcome.approved.len()
                )));
            }
        }

        PerfCmd::List { month, status } => {
            let status = status
                .as_deref()
                .map(|s| {
                    PerformanceStatus::from_code(s).ok_or_else(|| {
                        AppError::invalid(format!(
                            "unknown status '{s}', expected pending_self, pending_leader or completed"
                        ))
                    })
                })
                .transpose()?;

            let records = ReviewLogic::list(&mut repo, &me, *month, status)?;
            if records.is_empty() {
                info("No reviews found.");
            } else {
                let employees = repo.employees()?;
                print_records(&records, &employees, cfg);
            }
        }

        PerfCmd::Show { id } => {
            let r = ReviewLogic::show(&mut repo, &me, *id)?;
            let employees = repo.employees()?;
            print_detail(&r, &employees);
        }

        PerfCmd::Summary { month } => {
            let month = month_or_current(month);
            let records = ReviewLogic::list(&mut repo, &me, Some(month), None)?;
            let s = ReviewLogic::summarize(&records, month);

            header(format!("Reviews for {month}"));
            println!("Total          : {}", s.total);
            println!("Pending self   : {}", s.pending_self);
            println!("Pending leader : {}", s.pending_leader);
            println!("Completed      : {}", s.completed);
            match s.average_leader_score {
                Some(avg) => println!("Avg. leader    : {avg:.1}"),
                None => println!("Avg. leader    : --"),
            }

            if s.total > 0 && s.completed < s.total {
                warning(format!(
                    "{} review(s) still open for {month}.",
                    s.total - s.completed
                ));
            }
        }
    }

    Ok(())
}

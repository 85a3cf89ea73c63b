use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{BLUE, GREEN, MAGENTA, RED, RESET, WHITE, YELLOW};
use crate::utils::formatting::truncate;

const OP_WIDTH: usize = 40;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> &'static str {
    match op {
        "employee_add" | "salary_generate" => GREEN,
        "employee_delete" => RED,
        "employee_update" | "leader_stage" | "self_draft" => YELLOW,
        "migration_applied" => MAGENTA,
        "backup" | "export" => BLUE,
        other if other.starts_with("self_") || other.starts_with("leader_") => GREEN,
        other if other.starts_with("batch_") => GREEN,
        _ => WHITE,
    }
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the audit trail, oldest first.
    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let mut entries = load_log(pool, limit)?;
        entries.reverse();

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|r| r.id.to_string().len())
            .max()
            .unwrap_or(1);

        header("Internal log");

        for row in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| row.date.clone());

            // pad on the plain text, colour only the operation word
            let visible = truncate(&op_target(row), OP_WIDTH);
            let padding = " ".repeat(OP_WIDTH.saturating_sub(visible.chars().count()));
            let coloured = match visible.split_once(' ') {
                Some((op, rest)) => {
                    format!("{}{op}{RESET} {rest}", color_for_operation(&row.operation))
                }
                None => format!("{}{visible}{RESET}", color_for_operation(&row.operation)),
            };

            println!(
                "{:>id_w$}: {} | {}{} => {}",
                row.id, date, coloured, padding, row.message
            );
        }

        Ok(())
    }
}

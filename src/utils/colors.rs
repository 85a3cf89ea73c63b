/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::{PerformanceStatus, SalaryStatus};

pub fn color_for_review(status: PerformanceStatus) -> &'static str {
    match status {
        PerformanceStatus::PendingSelf => GREY,
        PerformanceStatus::PendingLeader => YELLOW,
        PerformanceStatus::Completed => GREEN,
    }
}

pub fn color_for_salary(status: SalaryStatus) -> &'static str {
    match status {
        SalaryStatus::Draft => YELLOW,
        SalaryStatus::Confirmed => CYAN,
        SalaryStatus::Paid => GREEN,
    }
}

/// Grey placeholder for missing values, plain text otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

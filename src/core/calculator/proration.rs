use crate::core::calculator::rounding::round_product;
use crate::models::YearMonth;
use chrono::{Datelike, NaiveDate};

/// Base salary actually due for `month`, given the employee's entry date.
///
/// Only the month in which the employee started is scaled; every other
/// month pays the full base.
pub fn pro_rated_base(base_salary: i64, entry_date: NaiveDate, month: YearMonth) -> i64 {
    if !month.contains(entry_date) {
        return base_salary;
    }

    let days_in_month = month.days_in_month() as i64;
    let days_worked = days_in_month - entry_date.day() as i64 + 1;

    round_product(base_salary, days_worked, days_in_month)
}

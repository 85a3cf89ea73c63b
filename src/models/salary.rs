use super::score::Score;
use super::year_month::YearMonth;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SalaryStatus {
    #[default]
    Draft,
    Confirmed,
    Paid,
}

impl SalaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryStatus::Draft => "draft",
            SalaryStatus::Confirmed => "confirmed",
            SalaryStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payroll result for one employee and month. All amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub id: u32,
    pub employee_id: u32,
    pub year_month: YearMonth,
    pub pro_rated_base_salary: i64,
    pub performance_base: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_score: Option<Score>,
    pub leader_score: Score,
    pub actual_performance_bonus: i64,
    pub insurance_deduction: i64,
    pub provident_fund_deduction: i64,
    pub taxable_income: i64,
    pub tax_amount: i64,
    pub net_salary: i64,
    #[serde(default)]
    pub status: SalaryStatus,
}

impl SalaryRecord {
    pub fn gross(&self) -> i64 {
        self.pro_rated_base_salary + self.actual_performance_bonus
    }

    pub fn is_key(&self, employee_id: u32, year_month: YearMonth) -> bool {
        self.employee_id == employee_id && self.year_month == year_month
    }
}

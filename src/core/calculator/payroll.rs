//! Derivation of a month's pay from base salary, entry date and appraisal score.

use crate::core::calculator::policy::PayrollPolicy;
use crate::core::calculator::proration::pro_rated_base;
use crate::core::calculator::rounding::round_product;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, SalaryRecord, SalaryStatus, Score, TaxCategory, YearMonth};
use chrono::NaiveDate;

/// Largest base salary or performance base accepted, in currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Reject negative amounts and amounts above [`MAX_AMOUNT`].
pub fn check_amount(field: &str, value: i64) -> AppResult<i64> {
    if !(0..=MAX_AMOUNT).contains(&value) {
        return Err(AppError::invalid(format!(
            "{field} must be between 0 and {MAX_AMOUNT}, got {value}"
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollInput {
    pub month: YearMonth,
    pub base_salary: i64,
    pub entry_date: NaiveDate,
    pub performance_base: i64,
    /// Percentage in `0..=100`; checked again by [`compute`].
    pub performance_score: i64,
    pub tax_category: TaxCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollBreakdown {
    pub pro_rated_base_salary: i64,
    pub actual_performance_bonus: i64,
    pub gross: i64,
    pub insurance_deduction: i64,
    pub provident_fund_deduction: i64,
    pub taxable_income: i64,
    pub tax_amount: i64,
    pub net_salary: i64,
}

impl PayrollInput {
    pub fn for_employee(emp: &Employee, month: YearMonth, score: Score) -> AppResult<Self> {
        let (Some(base_salary), Some(performance_base)) = (emp.base_salary, emp.performance_base)
        else {
            return Err(AppError::invalid(format!(
                "employee {} has no compensation configured",
                emp.employee_no
            )));
        };

        Ok(Self {
            month,
            base_salary,
            entry_date: emp.entry_date,
            performance_base,
            performance_score: score.percent(),
            tax_category: emp.tax_category,
        })
    }
}

/// Parse an entry date in `YYYY-MM-DD` form.
pub fn parse_entry_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid(format!("unparsable entry date '{s}', expected YYYY-MM-DD")))
}

pub fn compute(input: &PayrollInput, policy: &PayrollPolicy) -> AppResult<PayrollBreakdown> {
    check_amount("base salary", input.base_salary)?;
    check_amount("performance base", input.performance_base)?;
    Score::new(input.performance_score)?;
    policy.validate()?;

    let pro_rated_base_salary = pro_rated_base(input.base_salary, input.entry_date, input.month);
    let actual_performance_bonus =
        round_product(input.performance_base, input.performance_score, 100);

    let gross = pro_rated_base_salary + actual_performance_bonus;

    let insurance_deduction = policy.insurance(gross);
    let provident_fund_deduction = policy.provident_fund(gross);
    let taxable_income = gross - insurance_deduction - provident_fund_deduction;

    let tax_amount = policy.tax(taxable_income, input.tax_category);
    let net_salary = taxable_income - tax_amount;

    Ok(PayrollBreakdown {
        pro_rated_base_salary,
        actual_performance_bonus,
        gross,
        insurance_deduction,
        provident_fund_deduction,
        taxable_income,
        tax_amount,
        net_salary,
    })
}

/// Compute and package a [`SalaryRecord`] for an employee.
pub fn salary_record(
    id: u32,
    emp: &Employee,
    month: YearMonth,
    self_score: Option<Score>,
    leader_score: Score,
    status: SalaryStatus,
    policy: &PayrollPolicy,
) -> AppResult<SalaryRecord> {
    let input = PayrollInput::for_employee(emp, month, leader_score)?;
    let b = compute(&input, policy)?;

    Ok(SalaryRecord {
        id,
        employee_id: emp.id,
        year_month: month,
        pro_rated_base_salary: b.pro_rated_base_salary,
        performance_base: input.performance_base,
        self_score,
        leader_score,
        actual_performance_bonus: b.actual_performance_bonus,
        insurance_deduction: b.insurance_deduction,
        provident_fund_deduction: b.provident_fund_deduction,
        taxable_income: b.taxable_income,
        tax_amount: b.tax_amount,
        net_salary: b.net_salary,
        status,
    })
}

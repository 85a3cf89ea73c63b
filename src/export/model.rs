// src/export/model.rs

use crate::models::{Employee, SalaryRecord, YearMonth};
use serde::Serialize;

/// Flat row shared by the CSV, JSON and XLSX writers.
pub trait ExportRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;

    /// Whether column `col` holds amounts. Other columns are written as text,
    /// so account and id numbers keep every digit.
    fn numeric_column(_col: usize) -> bool {
        false
    }
}

pub const PERIOD_TOTAL: &str = "Period total";
pub const ADJUSTMENT: &str = "Petty cash adjustment";
pub const GRAND_TOTAL: &str = "Grand total";

/// One line of the payroll summary. Total lines only fill `name` and `net_salary`.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct SummaryRow {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Employee No")]
    pub employee_no: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Entry Date")]
    pub entry_date: String,
    #[serde(rename = "Base Salary")]
    pub base_salary: Option<i64>,
    #[serde(rename = "Performance Base")]
    pub performance_base: Option<i64>,
    #[serde(rename = "Self (%)")]
    pub self_score: String,
    #[serde(rename = "Leader (%)")]
    pub leader_score: String,
    #[serde(rename = "Gross Pay")]
    pub gross: Option<i64>,
    #[serde(rename = "Social Insurance")]
    pub insurance: Option<i64>,
    #[serde(rename = "Provident Fund")]
    pub provident_fund: Option<i64>,
    #[serde(rename = "Taxable Income")]
    pub taxable_income: Option<i64>,
    #[serde(rename = "Income Tax")]
    pub tax: Option<i64>,
    #[serde(rename = "Net Salary")]
    pub net_salary: i64,
    #[serde(rename = "ID Card")]
    pub id_card: String,
    #[serde(rename = "Bank Account")]
    pub bank_account: String,
    #[serde(rename = "Bank Branch")]
    pub bank_branch: String,
    #[serde(rename = "Phone")]
    pub phone: String,
}

const SUMMARY_HEADERS: [&str; 18] = [
    "Month",
    "Employee No",
    "Name",
    "Entry Date",
    "Base Salary",
    "Performance Base",
    "Self (%)",
    "Leader (%)",
    "Gross Pay",
    "Social Insurance",
    "Provident Fund",
    "Taxable Income",
    "Income Tax",
    "Net Salary",
    "ID Card",
    "Bank Account",
    "Bank Branch",
    "Phone",
];

fn opt(v: Option<i64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

impl ExportRow for SummaryRow {
    fn headers() -> &'static [&'static str] {
        &SUMMARY_HEADERS
    }

    fn numeric_column(col: usize) -> bool {
        matches!(col, 4 | 5 | 8..=13)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.employee_no.clone(),
            self.name.clone(),
            self.entry_date.clone(),
            opt(self.base_salary),
            opt(self.performance_base),
            self.self_score.clone(),
            self.leader_score.clone(),
            opt(self.gross),
            opt(self.insurance),
            opt(self.provident_fund),
            opt(self.taxable_income),
            opt(self.tax),
            self.net_salary.to_string(),
            self.id_card.clone(),
            self.bank_account.clone(),
            self.bank_branch.clone(),
            self.phone.clone(),
        ]
    }
}

/// One line of the bank payout file.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BankRow {
    #[serde(rename = "Seq")]
    pub seq: usize,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Account Name")]
    pub account_name: String,
    #[serde(rename = "Bank")]
    pub bank: String,
    #[serde(rename = "Branch Code")]
    pub branch_code: String,
    #[serde(rename = "Branch Name")]
    pub branch_name: String,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "Memo")]
    pub memo: String,
}

const BANK_HEADERS: [&str; 8] = [
    "Seq",
    "Account",
    "Account Name",
    "Bank",
    "Branch Code",
    "Branch Name",
    "Amount",
    "Memo",
];

impl ExportRow for BankRow {
    fn headers() -> &'static [&'static str] {
        &BANK_HEADERS
    }

    fn numeric_column(col: usize) -> bool {
        matches!(col, 0 | 6)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.seq.to_string(),
            self.account.clone(),
            self.account_name.clone(),
            self.bank.clone(),
            self.branch_code.clone(),
            self.branch_name.clone(),
            self.amount.to_string(),
            self.memo.clone(),
        ]
    }
}

fn month_records<'a>(
    salaries: &'a [SalaryRecord],
    month: YearMonth,
) -> impl Iterator<Item = &'a SalaryRecord> {
    salaries.iter().filter(move |s| s.year_month == month)
}

fn total_row(label: &str, amount: i64) -> SummaryRow {
    SummaryRow {
        name: label.to_string(),
        net_salary: amount,
        ..Default::default()
    }
}

/// Summary rows for `month`, joined on employee id, followed by the
/// period total, adjustment and grand total lines.
pub fn summary_rows(
    salaries: &[SalaryRecord],
    employees: &[Employee],
    month: YearMonth,
) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = month_records(salaries, month)
        .map(|s| {
            let emp = employees.iter().find(|e| e.id == s.employee_id);
            let text = |f: fn(&Employee) -> Option<String>| emp.and_then(f).unwrap_or_default();

            SummaryRow {
                month: month.compact(),
                employee_no: text(|e| Some(e.employee_no.clone())),
                name: text(|e| Some(e.name.clone())),
                entry_date: text(|e| Some(e.entry_date.format("%Y-%m-%d").to_string())),
                base_salary: Some(s.pro_rated_base_salary),
                performance_base: Some(s.performance_base),
                self_score: s.self_score.map(|v| format!("{v}%")).unwrap_or_default(),
                leader_score: format!("{}%", s.leader_score),
                gross: Some(s.gross()),
                insurance: Some(s.insurance_deduction),
                provident_fund: Some(s.provident_fund_deduction),
                taxable_income: Some(s.taxable_income),
                tax: Some(s.tax_amount),
                net_salary: s.net_salary,
                id_card: text(|e| e.id_card.clone()),
                bank_account: text(|e| e.bank_account.clone()),
                bank_branch: text(|e| e.bank_branch.clone()),
                phone: text(|e| Some(e.phone.clone())),
            }
        })
        .collect();

    let period_total: i64 = rows.iter().map(|r| r.net_salary).sum();
    let adjustment = 0;

    rows.push(total_row(PERIOD_TOTAL, period_total));
    rows.push(total_row(ADJUSTMENT, adjustment));
    rows.push(total_row(GRAND_TOTAL, period_total + adjustment));
    rows
}

/// Bank payout rows for `month`, optionally limited to one bank.
pub fn bank_rows(
    salaries: &[SalaryRecord],
    employees: &[Employee],
    month: YearMonth,
    bank: Option<&str>,
) -> Vec<BankRow> {
    let memo = format!("{:02} salary", month.month());

    month_records(salaries, month)
        .filter_map(|s| {
            let emp = employees.iter().find(|e| e.id == s.employee_id);
            let bank_name = emp.and_then(|e| e.bank_name.clone()).unwrap_or_default();
            match bank {
                Some(b) if !bank_name.to_lowercase().contains(&b.to_lowercase()) => None,
                _ => Some((s, emp, bank_name)),
            }
        })
        .enumerate()
        .map(|(i, (s, emp, bank_name))| BankRow {
            seq: i + 1,
            account: emp.and_then(|e| e.bank_account.clone()).unwrap_or_default(),
            account_name: emp.map(|e| e.name.clone()).unwrap_or_default(),
            bank: bank_name,
            branch_code: emp
                .and_then(|e| e.bank_branch_code.clone())
                .unwrap_or_default(),
            branch_name: emp.and_then(|e| e.bank_branch.clone()).unwrap_or_default(),
            amount: s.net_salary,
            memo: memo.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::PayrollPolicy;
    use crate::core::seed;

    fn data() -> (Vec<Employee>, Vec<SalaryRecord>, YearMonth) {
        let employees = seed::employees();
        let month = YearMonth::new(2026, 1).unwrap();
        let salaries = seed::salaries(&employees, month, &PayrollPolicy::default()).unwrap();
        (employees, salaries, month)
    }

    #[test]
    fn summary_has_one_row_per_record_plus_totals() {
        let (employees, salaries, month) = data();
        let rows = summary_rows(&salaries, &employees, month);

        assert_eq!(rows.len(), salaries.len() + 3);

        let first = &rows[0];
        assert_eq!(first.month, "202601");
        assert_eq!(first.employee_no, "T1001");
        assert_eq!(first.self_score, "85%");
        assert_eq!(first.gross, Some(12250));

        let n = rows.len();
        let total: i64 = salaries.iter().map(|s| s.net_salary).sum();
        assert_eq!(rows[n - 3].name, PERIOD_TOTAL);
        assert_eq!(rows[n - 3].net_salary, total);
        assert_eq!(rows[n - 2].net_salary, 0);
        assert_eq!(rows[n - 1].name, GRAND_TOTAL);
        assert_eq!(rows[n - 1].net_salary, total);
        assert_eq!(rows[n - 1].base_salary, None);
    }

    #[test]
    fn other_months_are_excluded() {
        let (employees, salaries, month) = data();
        let rows = summary_rows(&salaries, &employees, month.previous());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].net_salary, 0);
        assert!(bank_rows(&salaries, &employees, month.previous(), None).is_empty());
    }

    #[test]
    fn bank_rows_are_numbered_with_memo() {
        let (employees, salaries, month) = data();
        let rows = bank_rows(&salaries, &employees, month, None);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].seq, 1);
        assert_eq!(rows[4].seq, 5);
        assert_eq!(rows[0].memo, "01 salary");
        assert_eq!(rows[0].account_name, "Zhang San");
        assert_eq!(rows[0].amount, salaries[0].net_salary);

        assert_eq!(
            bank_rows(&salaries, &employees, month, Some("agricultural")).len(),
            5
        );
        assert!(bank_rows(&salaries, &employees, month, Some("ICBC")).is_empty());
    }

    #[test]
    fn cells_match_headers() {
        let (employees, salaries, month) = data();
        let s = &summary_rows(&salaries, &employees, month)[0];
        assert_eq!(s.cells().len(), SummaryRow::headers().len());
        let b = &bank_rows(&salaries, &employees, month, None)[0];
        assert_eq!(b.cells().len(), BankRow::headers().len());
    }
}

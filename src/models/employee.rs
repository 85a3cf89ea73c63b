use super::role::{EmploymentStatus, Role, TaxCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u32,
    pub employee_no: String,
    pub name: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub status: EmploymentStatus,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<u32>,

    // Payout / identity fields, only needed for the bank export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_branch_code: Option<String>,

    // Compensation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_salary: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_base: Option<i64>,
    #[serde(default)]
    pub tax_category: TaxCategory,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    pub fn has_compensation(&self) -> bool {
        self.base_salary.is_some() && self.performance_base.is_some()
    }

    /// Case-insensitive match on name, employee number or department.
    pub fn matches(&self, term: &str) -> bool {
        let t = term.trim().to_lowercase();
        if t.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&t)
            || self.employee_no.to_lowercase().contains(&t)
            || self.department.to_lowercase().contains(&t)
    }
}

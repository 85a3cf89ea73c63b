use crate::core::calculator::check_amount;
use crate::db::repo::{Repository, next_id};
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, EmploymentStatus, Role, Session, TaxCategory};
use chrono::NaiveDate;

pub struct EmployeeLogic;

/// Fields accepted when creating an employee.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub employee_no: String,
    pub name: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub entry_date: Option<NaiveDate>,
    pub role: Role,
    pub leader_id: Option<u32>,
    pub id_card: Option<String>,
    pub bank_account: Option<String>,
    pub bank_name: Option<String>,
    pub bank_branch: Option<String>,
    pub bank_branch_code: Option<String>,
    pub base_salary: Option<i64>,
    pub performance_base: Option<i64>,
    pub tax_category: TaxCategory,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub status: Option<EmploymentStatus>,
    pub role: Option<Role>,
    pub leader_id: Option<u32>,
    pub id_card: Option<String>,
    pub bank_account: Option<String>,
    pub bank_name: Option<String>,
    pub bank_branch: Option<String>,
    pub bank_branch_code: Option<String>,
    pub base_salary: Option<i64>,
    pub performance_base: Option<i64>,
    pub tax_category: Option<TaxCategory>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.entry_date.is_none()
            && self.status.is_none()
            && self.role.is_none()
            && self.leader_id.is_none()
            && self.id_card.is_none()
            && self.bank_account.is_none()
            && self.bank_name.is_none()
            && self.bank_branch.is_none()
            && self.bank_branch_code.is_none()
            && self.base_salary.is_none()
            && self.performance_base.is_none()
            && self.tax_category.is_none()
    }
}

const ADMINS: [Role; 2] = [Role::Leader, Role::Finance];

fn required(value: &str, field: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::invalid(format!("{field} is required")));
    }
    Ok(v.to_string())
}

fn amount(value: Option<i64>, field: &str) -> AppResult<()> {
    if let Some(v) = value {
        check_amount(field, v)?;
    }
    Ok(())
}

impl EmployeeLogic {
    pub fn list<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        search: Option<&str>,
    ) -> AppResult<Vec<Employee>> {
        session.require_role(&ADMINS)?;

        let mut list = repo.employees()?;
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            list.retain(|e| e.matches(term));
        }
        list.sort_by_key(|e| e.id);
        Ok(list)
    }

    pub fn add<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        new: NewEmployee,
        today: NaiveDate,
    ) -> AppResult<Employee> {
        session.require_role(&ADMINS)?;

        let name = required(&new.name, "name")?;
        let employee_no = required(&new.employee_no, "employee number")?;
        let phone = required(&new.phone, "phone")?;
        amount(new.base_salary, "base salary")?;
        amount(new.performance_base, "performance base")?;

        let mut list = repo.employees()?;
        if list
            .iter()
            .any(|e| e.employee_no.eq_ignore_ascii_case(&employee_no))
        {
            return Err(AppError::invalid(format!(
                "employee number {employee_no} already exists"
            )));
        }
        if let Some(leader) = new.leader_id
            && !list.iter().any(|e| e.id == leader)
        {
            return Err(AppError::not_found(format!("leader #{leader}")));
        }

        let emp = Employee {
            id: next_id(&list, |e| e.id),
            employee_no,
            name,
            phone,
            department: new.department.trim().to_string(),
            position: new.position.trim().to_string(),
            entry_date: new.entry_date.unwrap_or(today),
            status: EmploymentStatus::Active,
            role: new.role,
            leader_id: new.leader_id,
            id_card: new.id_card,
            bank_account: new.bank_account,
            bank_name: new.bank_name,
            bank_branch: new.bank_branch,
            bank_branch_code: new.bank_branch_code,
            base_salary: new.base_salary,
            performance_base: new.performance_base,
            tax_category: new.tax_category,
        };

        list.push(emp.clone());
        repo.save_employees(&list)?;
        repo.audit(
            "employee_add",
            &format!("emp#{}", emp.id),
            &format!("{} added {} ({})", session.employee_no, emp.name, emp.employee_no),
        );

        Ok(emp)
    }

    pub fn update<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        id: u32,
        upd: EmployeeUpdate,
    ) -> AppResult<Employee> {
        session.require_role(&ADMINS)?;

        if upd.is_empty() {
            return Err(AppError::invalid("nothing to update"));
        }
        amount(upd.base_salary, "base salary")?;
        amount(upd.performance_base, "performance base")?;

        let mut list = repo.employees()?;
        let pos = list
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("employee #{id}")))?;

        if let Some(leader) = upd.leader_id
            && (leader == id || !list.iter().any(|e| e.id == leader))
        {
            return Err(AppError::invalid(format!("invalid leader #{leader}")));
        }

        // build the new value before touching the list
        let mut emp = list[pos].clone();
        if let Some(v) = upd.name {
            emp.name = required(&v, "name")?;
        }
        if let Some(v) = upd.phone {
            emp.phone = required(&v, "phone")?;
        }
        if let Some(v) = upd.department {
            emp.department = v.trim().to_string();
        }
        if let Some(v) = upd.position {
            emp.position = v.trim().to_string();
        }
        if let Some(v) = upd.entry_date {
            emp.entry_date = v;
        }
        if let Some(v) = upd.status {
            emp.status = v;
        }
        if let Some(v) = upd.role {
            emp.role = v;
        }
        if upd.leader_id.is_some() {
            emp.leader_id = upd.leader_id;
        }
        if upd.id_card.is_some() {
            emp.id_card = upd.id_card;
        }
        if upd.bank_account.is_some() {
            emp.bank_account = upd.bank_account;
        }
        if upd.bank_name.is_some() {
            emp.bank_name = upd.bank_name;
        }
        if upd.bank_branch.is_some() {
            emp.bank_branch = upd.bank_branch;
        }
        if upd.bank_branch_code.is_some() {
            emp.bank_branch_code = upd.bank_branch_code;
        }
        if upd.base_salary.is_some() {
            emp.base_salary = upd.base_salary;
        }
        if upd.performance_base.is_some() {
            emp.performance_base = upd.performance_base;
        }
        if let Some(v) = upd.tax_category {
            emp.tax_category = v;
        }

        list[pos] = emp.clone();
        repo.save_employees(&list)?;
        repo.audit(
            "employee_update",
            &format!("emp#{id}"),
            &format!("{} updated {}", session.employee_no, emp.employee_no),
        );

        Ok(emp)
    }

    /// Remove an employee. Their reviews and salary records are kept.
    pub fn delete<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        id: u32,
    ) -> AppResult<Employee> {
        session.require_role(&ADMINS)?;

        if id == session.user_id {
            return Err(AppError::invalid("you cannot delete your own account"));
        }

        let mut list = repo.employees()?;
        let pos = list
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("employee #{id}")))?;
        let removed = list.remove(pos);

        repo.save_employees(&list)?;
        repo.audit(
            "employee_delete",
            &format!("emp#{id}"),
            &format!("{} deleted {}", session.employee_no, removed.employee_no),
        );

        Ok(removed)
    }
}

//! Explicit "who is acting" context, passed into every operation that
//! needs to know the current user.

use super::employee::Employee;
use super::role::Role;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: u32,
    pub name: String,
    pub role: Role,
    pub employee_no: String,
}

impl Session {
    pub fn for_employee(emp: &Employee) -> Self {
        Self {
            user_id: emp.id,
            name: emp.name.clone(),
            role: emp.role,
            employee_no: emp.employee_no.clone(),
        }
    }

    /// Resolve `ident` (numeric id or employee number) against the employee list.
    pub fn resolve(employees: &[Employee], ident: &str) -> AppResult<Self> {
        let ident = ident.trim();
        let by_id = ident.parse::<u32>().ok();

        employees
            .iter()
            .find(|e| Some(e.id) == by_id || e.employee_no.eq_ignore_ascii_case(ident))
            .map(Session::for_employee)
            .ok_or_else(|| AppError::not_found(format!("no employee matches '{ident}'")))
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    pub fn require_role(&self, roles: &[Role]) -> AppResult<()> {
        if self.has_role(roles) {
            return Ok(());
        }

        let allowed: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
        Err(AppError::Forbidden(format!(
            "{} ({}) is not allowed here; requires {}",
            self.name,
            self.role,
            allowed.join(" or ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;

    #[test]
    fn resolve_by_id_and_number() {
        let employees = seed::employees();

        let by_id = Session::resolve(&employees, "2").unwrap();
        assert_eq!(by_id.role, Role::Leader);

        let by_no = Session::resolve(&employees, "T1003").unwrap();
        assert_eq!(by_no.role, Role::Finance);
    }

    #[test]
    fn resolve_miss_is_not_found() {
        let employees = seed::employees();
        let err = Session::resolve(&employees, "nobody").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn require_role_rejects_other_roles() {
        let employees = seed::employees();
        let s = Session::resolve(&employees, "1").unwrap();
        assert!(s.require_role(&[Role::Employee]).is_ok());
        assert!(matches!(
            s.require_role(&[Role::Leader, Role::Finance]),
            Err(AppError::Forbidden(_))
        ));
    }
}

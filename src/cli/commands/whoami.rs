use crate::cli::commands::{open_repo, session};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{field, header};
use crate::utils::formatting::opt_money;

const W: usize = 12;

/// Print the profile of the `--as` user.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut repo = open_repo(cfg)?;
    let me = session(&mut repo, cli)?;
    let emp = repo.find_employee(me.user_id)?;

    let leader = match emp.leader_id {
        Some(id) => repo
            .find_employee(id)
            .map(|l| format!("{} {}", l.employee_no, l.name))
            .unwrap_or_else(|_| format!("#{id}")),
        None => "--".to_string(),
    };

    header(format!("{} ({})", emp.name, emp.employee_no));
    field("Role", W, emp.role.label());
    field("Department", W, &emp.department);
    field("Position", W, &emp.position);
    field("Entry date", W, emp.entry_date.format("%Y-%m-%d"));
    field("Status", W, emp.status.as_str());
    field("Leader", W, &leader);
    field("Phone", W, &emp.phone);
    field("Bank", W, emp.bank_name.as_deref().unwrap_or("--"));
    field("Branch", W, emp.bank_branch.as_deref().unwrap_or("--"));
    field("Base salary", W, opt_money(emp.base_salary));
    field("Perf. base", W, opt_money(emp.performance_base));
    field("Tax category", W, emp.tax_category.as_str());

    Ok(())
}

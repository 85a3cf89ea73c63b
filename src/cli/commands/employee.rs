use crate::cli::commands::{open_repo, session};
use crate::cli::parser::{Cli, Commands, EmployeeCmd, EmployeeFields};
use crate::config::Config;
use crate::core::calculator::parse_entry_date;
use crate::core::employees::{EmployeeLogic, EmployeeUpdate, NewEmployee};
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, EmploymentStatus, Role, TaxCategory};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::opt_money;
use crate::utils::table::{Column, Table};
use chrono::Local;

fn parse_role(code: &str) -> AppResult<Role> {
    Role::from_code(code).ok_or_else(|| {
        AppError::invalid(format!("unknown role '{code}', expected employee, leader or finance"))
    })
}

fn parse_tax(code: &str) -> AppResult<TaxCategory> {
    TaxCategory::from_code(code).ok_or_else(|| {
        AppError::invalid(format!("unknown tax category '{code}', expected standard or special"))
    })
}

fn parse_status(code: &str) -> AppResult<EmploymentStatus> {
    EmploymentStatus::from_code(code).ok_or_else(|| {
        AppError::invalid(format!("unknown status '{code}', expected active or inactive"))
    })
}

fn print_employees(list: &[Employee], cfg: &Config) {
    let mut table = Table::new(
        vec![
            Column::right("ID"),
            Column::left("No"),
            Column::left("Name"),
            Column::left("Department"),
            Column::left("Position"),
            Column::left("Role"),
            Column::left("Entry"),
            Column::right("Base"),
            Column::right("Perf. base"),
        ],
        &cfg.separator_char,
    );

    for e in list {
        let name = if e.is_active() {
            e.name.clone()
        } else {
            format!("{GREY}{} (inactive){RESET}", e.name)
        };
        table.add_row(vec![
            e.id.to_string(),
            e.employee_no.clone(),
            name,
            e.department.clone(),
            e.position.clone(),
            e.role.label().to_string(),
            e.entry_date.format("%Y-%m-%d").to_string(),
            opt_money(e.base_salary),
            opt_money(e.performance_base),
        ]);
    }

    table.print();
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Employee(cmd) = &cli.command else {
        return Ok(());
    };

    let mut repo = open_repo(cfg)?;
    let me = session(&mut repo, cli)?;

    match cmd {
        EmployeeCmd::List { search } => {
            let list = EmployeeLogic::list(&mut repo, &me, search.as_deref())?;
            if list.is_empty() {
                info("No employees found.");
            } else {
                print_employees(&list, cfg);
            }
        }

        EmployeeCmd::Add {
            employee_no,
            name,
            phone,
            fields,
        } => {
            let new = NewEmployee {
                employee_no: employee_no.clone(),
                name: name.clone(),
                phone: phone.clone(),
                department: fields.department.clone().unwrap_or_default(),
                position: fields.position.clone().unwrap_or_default(),
                entry_date: fields.entry_date.as_deref().map(parse_entry_date).transpose()?,
                role: fields.role.as_deref().map(parse_role).transpose()?.unwrap_or_default(),
                leader_id: fields.leader,
                id_card: fields.id_card.clone(),
                bank_account: fields.bank_account.clone(),
                bank_name: fields.bank_name.clone(),
                bank_branch: fields.bank_branch.clone(),
                bank_branch_code: fields.bank_branch_code.clone(),
                base_salary: fields.base_salary,
                performance_base: fields.performance_base,
                tax_category: fields
                    .tax_category
                    .as_deref()
                    .map(parse_tax)
                    .transpose()?
                    .unwrap_or_default(),
            };

            let emp = EmployeeLogic::add(&mut repo, &me, new, Local::now().date_naive())?;
            success(format!(
                "Employee #{} added: {} ({})",
                emp.id, emp.name, emp.employee_no
            ));
        }

        EmployeeCmd::Update {
            id,
            name,
            phone,
            status,
            fields,
        } => {
            let upd = update_from(name, phone, status, fields)?;
            let emp = EmployeeLogic::update(&mut repo, &me, *id, upd)?;
            success(format!("Employee #{} updated: {}", emp.id, emp.name));
        }

        EmployeeCmd::Del { id } => {
            let emp = EmployeeLogic::delete(&mut repo, &me, *id)?;
            success(format!(
                "Employee #{} deleted: {} ({})",
                emp.id, emp.name, emp.employee_no
            ));
        }
    }

    Ok(())
}

fn update_from(
    name: &Option<String>,
    phone: &Option<String>,
    status: &Option<String>,
    fields: &EmployeeFields,
) -> AppResult<EmployeeUpdate> {
    Ok(EmployeeUpdate {
        name: name.clone(),
        phone: phone.clone(),
        department: fields.department.clone(),
        position: fields.position.clone(),
        entry_date: fields.entry_date.as_deref().map(parse_entry_date).transpose()?,
        status: status.as_deref().map(parse_status).transpose()?,
        role: fields.role.as_deref().map(parse_role).transpose()?,
        leader_id: fields.leader,
        id_card: fields.id_card.clone(),
        bank_account: fields.bank_account.clone(),
        bank_name: fields.bank_name.clone(),
        bank_branch: fields.bank_branch.clone(),
        bank_branch_code: fields.bank_branch_code.clone(),
        base_salary: fields.base_salary,
        performance_base: fields.performance_base,
        tax_category: fields.tax_category.as_deref().map(parse_tax).transpose()?,
    })
}

use crate::cli::commands::{month_or_current, open_repo, session};
use crate::cli::parser::{Cli, Commands, SalaryCmd};
use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::errors::AppResult;
use crate::models::{Employee, SalaryRecord, Session};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{RESET, color_for_salary};
use crate::utils::formatting::{bold, money, opt_score};
use crate::utils::table::{Column, Table};

fn employee_label(employees: &[Employee], id: u32) -> String {
    employees
        .iter()
        .find(|e| e.id == id)
        .map(|e| format!("{} {}", e.employee_no, e.name))
        .unwrap_or_else(|| format!("#{id}"))
}

fn print_salaries(records: &[SalaryRecord], employees: &[Employee], cfg: &Config) {
    let mut table = Table::new(
        vec![
            Column::left("Month"),
            Column::left("Employee"),
            Column::right("Base"),
            Column::right("Score"),
            Column::right("Bonus"),
            Column::right("Gross"),
            Column::right("Deductions"),
            Column::right("Tax"),
            Column::right("Net"),
            Column::left("Status"),
        ],
        &cfg.separator_char,
    );

    for s in records {
        table.add_row(vec![
            s.year_month.to_string(),
            employee_label(employees, s.employee_id),
            money(s.pro_rated_base_salary),
            s.leader_score.to_string(),
            money(s.actual_performance_bonus),
            money(s.gross()),
            money(s.insurance_deduction + s.provident_fund_deduction),
            money(s.tax_amount),
            money(s.net_salary),
            format!("{}{}{RESET}", color_for_salary(s.status), s.status),
        ]);
    }

    table.print();
}

fn print_breakdown(s: &SalaryRecord, employees: &[Employee]) {
    header(format!(
        "Salary {} for {}",
        s.year_month,
        employee_label(employees, s.employee_id)
    ));
    println!("Base salary (pro-rated) : {:>10}", money(s.pro_rated_base_salary));
    println!("Performance base        : {:>10}", money(s.performance_base));
    println!("Self score              : {:>10}", opt_score(s.self_score));
    println!("Leader score            : {:>10}", s.leader_score.to_string());
    println!("Performance bonus       : {:>10}", money(s.actual_performance_bonus));
    println!("Gross pay               : {:>10}", money(s.gross()));
    println!("Social insurance        : {:>10}", money(-s.insurance_deduction));
    println!("Provident fund          : {:>10}", money(-s.provident_fund_deduction));
    println!("Taxable income          : {:>10}", money(s.taxable_income));
    println!("Income tax              : {:>10}", money(-s.tax_amount));
    println!("{}", bold(&format!("Net salary              : {:>10}", money(s.net_salary))));
    println!("Status                  : {:>10}", s.status.as_str());
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Salary(cmd) = &cli.command else {
        return Ok(());
    };

    let mut repo = open_repo(cfg)?;
    let me = session(&mut repo, cli)?;

    match cmd {
        SalaryCmd::Generate { month } => {
            let month = month_or_current(month);
            let report = PayrollLogic::generate(&mut repo, &me, month, &cfg.policy())?;

            for s in &report.created {
                success(format!(
                    "Salary #{} drafted for employee #{}: net {}",
                    s.id,
                    s.employee_id,
                    money(s.net_salary)
                ));
            }
            for (no, reason) in &report.skipped {
                warning(format!("Skipped {no}: {reason}"));
            }
            info(format!(
                "{month}: {} created, {} skipped.",
                report.created.len(),
                report.skipped.len()
            ));
        }

        SalaryCmd::List { month } => {
            let records = PayrollLogic::list(&mut repo, &me, *month)?;
            if records.is_empty() {
                info("No salary records found.");
                return Ok(());
            }

            let employees = repo.employees()?;
            print_salaries(&records, &employees, cfg);

            let t = PayrollLogic::totals(&records);
            println!();
            println!("Records      : {}", t.count);
            println!("Total net    : {}", money(t.total_net));
            println!("Total tax    : {}", money(t.total_tax));
            if let Some(avg) = t.average_leader_score {
                println!("Avg. score   : {avg:.1}");
            }
        }

        SalaryCmd::Show { employee, month } => {
            let employees = repo.employees()?;
            let target = match employee {
                Some(ident) => Session::resolve(&employees, ident)?.user_id,
                None => me.user_id,
            };
            let record = PayrollLogic::show(&mut repo, &me, target, *month)?;
            print_breakdown(&record, &employees);
        }
    }

    Ok(())
}

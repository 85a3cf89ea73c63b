//! Demo data written into an empty store on first access.

use crate::core::calculator::{PayrollPolicy, salary_record};
use crate::errors::AppResult;
use crate::models::{
    Employee, EmploymentStatus, PerformanceRecord, PerformanceStatus, Role, SalaryRecord,
    SalaryStatus, Score, TaxCategory, YearMonth,
};
use chrono::{NaiveDate, NaiveDateTime};

struct Demo {
    id: u32,
    no: &'static str,
    name: &'static str,
    department: &'static str,
    position: &'static str,
    entry: (i32, u32, u32),
    role: Role,
    leader_id: Option<u32>,
    branch: (&'static str, &'static str),
    pay: Option<(i64, i64)>,
}

const BRANCH_CHAOYANG: (&str, &str) = ("Beijing Chaoyang Sub-branch", "103100000011");
const BRANCH_HAIDIAN: (&str, &str) = ("Beijing Haidian Sub-branch", "103100000022");
const BRANCH_XICHENG: (&str, &str) = ("Beijing Xicheng Sub-branch", "103100000033");

const DEMO: [Demo; 7] = [
    Demo {
        id: 1,
        no: "T1001",
        name: "Zhang San",
        department: "Product",
        position: "Product Manager",
        entry: (2023, 1, 15),
        role: Role::Employee,
        leader_id: Some(2),
        branch: BRANCH_CHAOYANG,
        pay: Some((8000, 5000)),
    },
    Demo {
        id: 2,
        no: "T1002",
        name: "Li Jingli",
        department: "Product",
        position: "Department Manager",
        entry: (2021, 3, 20),
        role: Role::Leader,
        leader_id: None,
        branch: BRANCH_HAIDIAN,
        pay: None,
    },
    Demo {
        id: 3,
        no: "T1003",
        name: "Wang Caiwu",
        department: "Finance",
        position: "Finance Supervisor",
        entry: (2020, 6, 10),
        role: Role::Finance,
        leader_id: None,
        branch: BRANCH_XICHENG,
        pay: None,
    },
    Demo {
        id: 4,
        no: "T1004",
        name: "Li Si",
        department: "Engineering",
        position: "Frontend Engineer",
        entry: (2022, 8, 5),
        role: Role::Employee,
        leader_id: Some(2),
        branch: BRANCH_CHAOYANG,
        pay: Some((12000, 6000)),
    },
    Demo {
        id: 5,
        no: "T1005",
        name: "Wang Wu",
        department: "Product",
        position: "Product Assistant",
        entry: (2023, 11, 1),
        role: Role::Employee,
        leader_id: Some(2),
        branch: BRANCH_HAIDIAN,
        pay: Some((6000, 4000)),
    },
    Demo {
        id: 6,
        no: "T1006",
        name: "Zhao Liu",
        department: "Engineering",
        position: "Backend Engineer",
        entry: (2022, 5, 15),
        role: Role::Employee,
        leader_id: Some(2),
        branch: BRANCH_CHAOYANG,
        pay: Some((11000, 6000)),
    },
    Demo {
        id: 7,
        no: "T1007",
        name: "Sun Qi",
        department: "Engineering",
        position: "UI Designer",
        entry: (2023, 3, 20),
        role: Role::Employee,
        leader_id: Some(2),
        branch: BRANCH_CHAOYANG,
        pay: Some((7500, 4500)),
    },
];

/// Self / leader scores used for the seeded payroll month, per reviewed employee.
const PAYROLL_SCORES: [(i64, i64); 5] = [(85, 85), (90, 88), (75, 75), (88, 90), (80, 82)];

pub const DEFAULT_LEADER_COMMENT: &str = "Good performance, keep it up.";

pub fn employees() -> Vec<Employee> {
    DEMO.iter()
        .map(|d| {
            let (y, m, day) = d.entry;
            Employee {
                id: d.id,
                employee_no: d.no.to_string(),
                name: d.name.to_string(),
                phone: format!("138001380{:02}", d.id),
                department: d.department.to_string(),
                position: d.position.to_string(),
                entry_date: NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default(),
                status: EmploymentStatus::Active,
                role: d.role,
                leader_id: d.leader_id,
                id_card: Some(format!("1101011990010{:05}", 1230 + d.id)),
                bank_account: Some(format!("62284800100000000{:02}", d.id)),
                bank_name: Some("Agricultural Bank of China".to_string()),
                bank_branch: Some(d.branch.0.to_string()),
                bank_branch_code: Some(d.branch.1.to_string()),
                base_salary: d.pay.map(|p| p.0),
                performance_base: d.pay.map(|p| p.1),
                tax_category: TaxCategory::Standard,
            }
        })
        .collect()
}

fn reviewed(employees: &[Employee]) -> impl Iterator<Item = &Employee> {
    employees.iter().filter(|e| e.role == Role::Employee)
}

fn stamp(month: YearMonth, day: u32, h: u32, min: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(month.year(), month.month(), day)
        .and_then(|d| d.and_hms_opt(h, min, 0))
}

struct DemoReview {
    self_score: i64,
    self_comment: &'static str,
    /// (day, hour, minute) of the self submission
    submitted: (u32, u32, u32),
    leader: Option<(i64, &'static str)>,
}

const DEMO_REVIEWS: [DemoReview; 3] = [
    DemoReview {
        self_score: 85,
        self_comment: "Finished requirements and prototypes for product v2.0; good user feedback.",
        submitted: (10, 10, 30),
        leader: Some((85, "Good performance, keep it up.")),
    },
    DemoReview {
        self_score: 90,
        self_comment: "Delivered three core feature modules with excellent code quality.",
        submitted: (12, 14, 20),
        leader: Some((88, "Strong technical skills, excellent month.")),
    },
    DemoReview {
        self_score: 75,
        self_comment: "Supported two releases and cleaned up the backlog.",
        submitted: (13, 9, 0),
        leader: None,
    },
];

/// One review per reviewed employee for `month`: the first two completed,
/// the third awaiting its leader, the rest not started.
pub fn performances(employees: &[Employee], month: YearMonth) -> Vec<PerformanceRecord> {
    let leader = employees.iter().find(|e| e.role == Role::Leader).map(|e| e.id);

    reviewed(employees)
        .enumerate()
        .map(|(index, emp)| {
            let mut r = PerformanceRecord::new(index as u32 + 1, emp.id, month);

            let Some(demo) = DEMO_REVIEWS.get(index) else {
                return r;
            };

            let (day, h, min) = demo.submitted;
            r.self_score = Score::new(demo.self_score).ok();
            r.self_comment = Some(demo.self_comment.to_string());
            r.self_submitted_at = stamp(month, day, h, min);
            r.status = PerformanceStatus::PendingLeader;

            if let Some((score, comment)) = demo.leader {
                r.leader_score = Score::new(score).ok();
                r.leader_comment = Some(comment.to_string());
                r.leader_id = leader;
                r.leader_assessed_at = stamp(month, 15, 16, 0);
                r.status = PerformanceStatus::Completed;
            }

            r
        })
        .collect()
}

/// Paid salary records for `month`, computed with `policy`.
pub fn salaries(
    employees: &[Employee],
    month: YearMonth,
    policy: &PayrollPolicy,
) -> AppResult<Vec<SalaryRecord>> {
    let mut out = Vec::new();

    for (index, emp) in reviewed(employees)
        .filter(|e| e.has_compensation())
        .enumerate()
    {
        let (self_score, leader_score) = PAYROLL_SCORES.get(index).copied().unwrap_or((80, 80));

        out.push(salary_record(
            index as u32 + 1,
            emp,
            month,
            Some(Score::new(self_score)?),
            Score::new(leader_score)?,
            SalaryStatus::Paid,
            policy,
        )?);
    }

    Ok(out)
}

pub mod payroll;
pub mod policy;
pub mod proration;
pub mod rounding;

pub use payroll::{
    MAX_AMOUNT, PayrollBreakdown, PayrollInput, check_amount, compute, parse_entry_date,
    salary_record,
};
pub use policy::PayrollPolicy;

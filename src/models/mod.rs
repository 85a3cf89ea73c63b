pub mod employee;
pub mod performance;
pub mod role;
pub mod salary;
pub mod score;
pub mod session;
pub mod year_month;

pub use employee::Employee;
pub use performance::{PerformanceRecord, PerformanceStatus};
pub use role::{EmploymentStatus, Role, TaxCategory};
pub use salary::{SalaryRecord, SalaryStatus};
pub use score::Score;
pub use session::Session;
pub use year_month::YearMonth;

pub mod backup;
pub mod calculator;
pub mod employees;
pub mod log;
pub mod payroll;
pub mod review;
pub mod seed;
pub mod workflow;

//! Typed access to the three collections, with lookups by natural key.

use crate::core::calculator::PayrollPolicy;
use crate::core::seed;
use crate::db::store::{RecordStore, StoreKey};
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, PerformanceRecord, SalaryRecord, YearMonth};

/// What an empty store is seeded with.
#[derive(Debug, Clone)]
pub struct SeedContext {
    /// Month of the seeded reviews; salaries are seeded for the month before.
    pub month: YearMonth,
    pub policy: PayrollPolicy,
}

impl SeedContext {
    pub fn new(month: YearMonth, policy: PayrollPolicy) -> Self {
        Self { month, policy }
    }
}

pub struct Repository<S: RecordStore> {
    store: S,
    seed: SeedContext,
}

impl<S: RecordStore> Repository<S> {
    pub fn new(store: S, seed: SeedContext) -> Self {
        Self { store, seed }
    }

    /// Non-fatal audit line; failures are reported but never abort the operation.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message) {
            crate::ui::messages::warning(format!("Failed to write internal log: {e}"));
        }
    }

    // ---------------------------
    // Collections
    // ---------------------------

    pub fn employees(&mut self) -> AppResult<Vec<Employee>> {
        self.store
            .get_or_init(StoreKey::Employees, || Ok(seed::employees()))
    }

    pub fn performances(&mut self) -> AppResult<Vec<PerformanceRecord>> {
        if self.store.load(StoreKey::Performances)?.is_none() {
            let employees = self.employees()?;
            let month = self.seed.month;
            return self
                .store
                .get_or_init(StoreKey::Performances, || {
                    Ok(seed::performances(&employees, month))
                });
        }
        self.store.get_or_init(StoreKey::Performances, || Ok(Vec::new()))
    }

    pub fn salaries(&mut self) -> AppResult<Vec<SalaryRecord>> {
        if self.store.load(StoreKey::Salaries)?.is_none() {
            let employees = self.employees()?;
            let month = self.seed.month.previous();
            let policy = self.seed.policy.clone();
            return self.store.get_or_init(StoreKey::Salaries, || {
                seed::salaries(&employees, month, &policy)
            });
        }
        self.store.get_or_init(StoreKey::Salaries, || Ok(Vec::new()))
    }

    pub fn save_employees(&mut self, list: &[Employee]) -> AppResult<()> {
        self.store.set(StoreKey::Employees, list)
    }

    pub fn save_performances(&mut self, list: &[PerformanceRecord]) -> AppResult<()> {
        self.store.set(StoreKey::Performances, list)
    }

    pub fn save_salaries(&mut self, list: &[SalaryRecord]) -> AppResult<()> {
        self.store.set(StoreKey::Salaries, list)
    }

    /// Touch every collection so an empty store gets its seed data.
    pub fn ensure_seeded(&mut self) -> AppResult<()> {
        self.employees()?;
        self.performances()?;
        self.salaries()?;
        Ok(())
    }

    // ---------------------------
    // Lookups
    // ---------------------------

    pub fn find_employee(&mut self, id: u32) -> AppResult<Employee> {
        self.employees()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("employee #{id}")))
    }

    pub fn find_performance(&mut self, id: u32) -> AppResult<PerformanceRecord> {
        self.performances()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("performance record #{id}")))
    }

    pub fn find_performance_by_key(
        &mut self,
        employee_id: u32,
        month: YearMonth,
    ) -> AppResult<PerformanceRecord> {
        self.performances()?
            .into_iter()
            .find(|p| p.is_key(employee_id, month))
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "performance record for employee #{employee_id} in {month}"
                ))
            })
    }

    pub fn find_salary(&mut self, employee_id: u32, month: YearMonth) -> AppResult<SalaryRecord> {
        self.salaries()?
            .into_iter()
            .find(|s| s.is_key(employee_id, month))
            .ok_or_else(|| {
                AppError::not_found(format!("salary for employee #{employee_id} in {month}"))
            })
    }
}

/// Next free id in a collection (max + 1, so ids are never reused after deletes).
pub fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> u32) -> u32 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

//! Withholding and tax parameters used by the payroll calculator.

use crate::core::calculator::rounding::{BP_SCALE, apply_rate_bp};
use crate::errors::{AppError, AppResult};
use crate::models::TaxCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Social insurance withheld from gross pay, in basis points.
    pub insurance_rate_bp: i64,
    /// Provident fund withheld from gross pay, in basis points.
    pub provident_fund_rate_bp: i64,
    /// Flat rate applied above the threshold, in basis points.
    pub tax_rate_bp: i64,
    pub standard_threshold: i64,
    pub special_threshold: i64,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            insurance_rate_bp: 1250,
            provident_fund_rate_bp: 800,
            tax_rate_bp: 300,
            standard_threshold: 5000,
            special_threshold: 10000,
        }
    }
}

impl PayrollPolicy {
    pub fn validate(&self) -> AppResult<()> {
        for (name, rate) in [
            ("insurance_rate_bp", self.insurance_rate_bp),
            ("provident_fund_rate_bp", self.provident_fund_rate_bp),
            ("tax_rate_bp", self.tax_rate_bp),
        ] {
            if !(0..=BP_SCALE).contains(&rate) {
                return Err(AppError::invalid(format!(
                    "{name} must be between 0 and {BP_SCALE}, got {rate}"
                )));
            }
        }

        if self.insurance_rate_bp + self.provident_fund_rate_bp > BP_SCALE {
            return Err(AppError::invalid(
                "insurance and provident fund rates together exceed 100%",
            ));
        }

        if self.standard_threshold < 0 || self.special_threshold < 0 {
            return Err(AppError::invalid("tax thresholds must not be negative"));
        }

        Ok(())
    }

    pub fn threshold(&self, category: TaxCategory) -> i64 {
        match category {
            TaxCategory::Standard => self.standard_threshold,
            TaxCategory::Special => self.special_threshold,
        }
    }

    pub fn insurance(&self, gross: i64) -> i64 {
        apply_rate_bp(gross, self.insurance_rate_bp)
    }

    pub fn provident_fund(&self, gross: i64) -> i64 {
        apply_rate_bp(gross, self.provident_fund_rate_bp)
    }

    /// Flat-threshold income tax: only the part above the threshold is taxed.
    pub fn tax(&self, taxable_income: i64, category: TaxCategory) -> i64 {
        let taxable_amount = (taxable_income - self.threshold(category)).max(0);
        apply_rate_bp(taxable_amount, self.tax_rate_bp)
    }
}

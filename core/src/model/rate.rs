use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Largest accepted per-visit payment.
pub const MAX_BASE_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Per-visit contribution parameters. Fixed for the lifetime of the process.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ContributionRate {
    /// Payment per visit the fractions apply to.
    pub base_amount: Decimal,
    /// Employer pension fraction.
    pub pension_rate: Decimal,
    /// Employer benefits fraction.
    pub benefits_rate: Decimal,
    /// Fraction withheld from the employee.
    pub employee_rate: Decimal,
}

impl Default for ContributionRate {
    fn default() -> Self {
        Self {
            base_amount: Decimal::new(260, 0),
            pension_rate: Decimal::new(125, 3),
            benefits_rate: Decimal::new(6, 2),
            employee_rate: Decimal::new(6, 2),
        }
    }
}

impl ContributionRate {
    /// Rate with a single employer fraction instead of the pension/benefits split.
    pub fn flat(base_amount: Decimal, employer_rate: Decimal, employee_rate: Decimal) -> Self {
        Self {
            base_amount,
            pension_rate: employer_rate,
            benefits_rate: Decimal::ZERO,
            employee_rate,
        }
    }

    /// Combined employer fraction, or `None` if the sum overflows.
    pub fn employer_rate(&self) -> Option<Decimal> {
        self.pension_rate.checked_add(self.benefits_rate)
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.base_amount <= Decimal::ZERO || self.base_amount > MAX_BASE_AMOUNT {
            return Err(LedgerError::Validation(format!(
                "base amount must be positive and at most {} (got {})",
                MAX_BASE_AMOUNT, self.base_amount
            )));
        }
        let fractions = [
            ("pension rate", self.pension_rate),
            ("benefits rate", self.benefits_rate),
            ("employee rate", self.employee_rate),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(LedgerError::Validation(format!(
                    "{} must be between 0 and 1 (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

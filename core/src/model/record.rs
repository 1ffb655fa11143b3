use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::model::contribution::Contribution;
use crate::model::visits::Visits;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Checks a zero-based month index (0 = January).
pub fn check_month(month: u32) -> Result<u32, LedgerError> {
    if month < MONTHS_PER_YEAR {
        Ok(month)
    } else {
        Err(LedgerError::Validation(format!(
            "month index must be between 0 and 11 (got {})",
            month
        )))
    }
}

/// A saved visit count for one month. Amounts are fixed at creation and
/// never recomputed from a later rate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VisitRecord {
    pub id: Uuid,
    pub year: i32,
    pub month: u32,
    pub visits: Visits,
    pub employer_contribution: Decimal,
    pub employee_contribution: Decimal,
    pub created_at: DateTime<Utc>,
}

impl VisitRecord {
    pub fn new(year: i32, month: u32, visits: Visits, contribution: Contribution) -> Self {
        Self {
            id: Uuid::new_v4(),
            year,
            month,
            visits,
            employer_contribution: contribution.employer,
            employee_contribution: contribution.employee,
            created_at: Utc::now(),
        }
    }

    pub fn is_for(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

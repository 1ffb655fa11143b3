use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::record::VisitRecord;
use crate::model::visits::Visits;

/// Employer and employee amounts produced by the calculator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contribution {
    pub employer: Decimal,
    pub employee: Decimal,
}

impl Contribution {
    pub fn total(&self) -> Decimal {
        self.employer + self.employee
    }
}

/// One row of the monthly table.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthContribution {
    pub visits: Visits,
    pub employer: Decimal,
    pub employee: Decimal,
}

impl MonthContribution {
    /// Placeholder for a month with no effective record.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl From<&VisitRecord> for MonthContribution {
    fn from(record: &VisitRecord) -> Self {
        Self {
            visits: record.visits,
            employer: record.employer_contribution,
            employee: record.employee_contribution,
        }
    }
}

use serde::Serialize;

use crate::model::contribution::MonthContribution;
use crate::model::record::MONTHS_PER_YEAR;

/// The twelve effective months of one year, January first.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct YearView {
    pub year: i32,
    pub months: [MonthContribution; MONTHS_PER_YEAR as usize],
}

impl YearView {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            months: [MonthContribution::empty(); MONTHS_PER_YEAR as usize],
        }
    }

    pub fn month(&self, month: u32) -> Option<&MonthContribution> {
        self.months.get(month as usize)
    }

    pub fn as_slice(&self) -> &[MonthContribution] {
        &self.months
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &MonthContribution)> {
        self.months.iter().enumerate().map(|(i, m)| (i as u32, m))
    }
}

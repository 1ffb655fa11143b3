use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::model::{MonthContribution, Summary, VisitRecord, YearView, MONTHS_PER_YEAR};

/// Latest record for (year, month). On equal timestamps the one appearing
/// later in `records` wins.
pub fn effective_record(records: &[VisitRecord], year: i32, month: u32) -> Option<&VisitRecord> {
    records
        .iter()
        .filter(|r| r.is_for(year, month))
        .fold(None, |best, candidate| match best {
            Some(current) if current.created_at > candidate.created_at => Some(current),
            _ => Some(candidate),
        })
}

pub fn year_view(records: &[VisitRecord], year: i32) -> YearView {
    let mut view = YearView::empty(year);
    for month in 0..MONTHS_PER_YEAR {
        if let Some(record) = effective_record(records, year, month) {
            view.months[month as usize] = MonthContribution::from(record);
        }
    }
    view
}

/// Totals over the selected months.
///
/// Duplicate indices count once. Indices past 11, or past the end of
/// `contributions`, add nothing; only the former are excluded from
/// `included_count`.
pub fn aggregate<I>(selection: I, contributions: &[MonthContribution]) -> Summary
where
    I: IntoIterator<Item = u32>,
{
    let included: BTreeSet<u32> = selection
        .into_iter()
        .filter(|m| *m < MONTHS_PER_YEAR)
        .collect();

    let (total_employer, total_employee) = included
        .iter()
        .filter_map(|m| contributions.get(*m as usize))
        .fold((Decimal::ZERO, Decimal::ZERO), |(employer, employee), c| {
            (employer + c.employer, employee + c.employee)
        });

    Summary {
        total_employer,
        total_employee,
        total_combined: total_employer + total_employee,
        included_count: included.len(),
    }
}

use tracing::{debug, info, warn};

use crate::aggregate;
use crate::calculator::contribution_for;
use crate::error::LedgerError;
use crate::model::{
    check_month, ContributionRate, MonthContribution, Summary, VisitRecord, Visits, YearView,
};
use crate::repository::VisitRecordRepository;

pub struct LedgerService<R: VisitRecordRepository> {
    repo: R,
    rate: ContributionRate,
}

impl<R: VisitRecordRepository> LedgerService<R> {
    pub fn new(repo: R, rate: ContributionRate) -> Result<Self, LedgerError> {
        rate.validate()?;
        Ok(Self { repo, rate })
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Records `visit_count` for the month, superseding any earlier record.
    pub fn upsert_month(
        &self,
        year: i32,
        month: u32,
        visit_count: u8,
    ) -> Result<VisitRecord, LedgerError> {
        let month = check_month(month)?;
        let visits = Visits::try_from(visit_count)?;
        let contribution = contribution_for(visits, &self.rate)?;
        let record = VisitRecord::new(year, month, visits, contribution);

        let stored = self.repo.upsert(record).map_err(|e| {
            warn!(year, month, error = %e, "failed to store visit record");
            LedgerError::Persistence(e)
        })?;
        info!(
            year,
            month,
            visits = visits.count(),
            employer = %stored.employer_contribution,
            employee = %stored.employee_contribution,
            "stored visit record"
        );
        Ok(stored)
    }

    /// Effective values for the month; the empty sentinel when nothing is stored.
    pub fn effective_record(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthContribution, LedgerError> {
        let month = check_month(month)?;
        let records = self.load(year)?;
        Ok(aggregate::effective_record(&records, year, month)
            .map(MonthContribution::from)
            .unwrap_or_else(MonthContribution::empty))
    }

    pub fn year_view(&self, year: i32) -> Result<YearView, LedgerError> {
        let records = self.load(year)?;
        Ok(aggregate::year_view(&records, year))
    }

    pub fn summary<I>(&self, year: i32, selection: I) -> Result<Summary, LedgerError>
    where
        I: IntoIterator<Item = u32>,
    {
        let view = self.year_view(year)?;
        Ok(aggregate::aggregate(selection, view.as_slice()))
    }

    fn load(&self, year: i32) -> Result<Vec<VisitRecord>, LedgerError> {
        let records = self.repo.list(year).map_err(|e| {
            warn!(year, error = %e, "failed to load visit records");
            LedgerError::Persistence(e)
        })?;
        debug!(year, count = records.len(), "loaded visit records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FileVisitRecordRepository, InMemoryVisitRecordRepository};
    use anyhow::{anyhow, Result};
    use rust_decimal::Decimal;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct FailingRepo;

    impl VisitRecordRepository for FailingRepo {
        fn list(&self, _year: i32) -> Result<Vec<VisitRecord>> {
            Err(anyhow!("connection refused"))
        }
        fn upsert(&self, _record: VisitRecord) -> Result<VisitRecord> {
            Err(anyhow!("connection refused"))
        }
    }

    /// Counts writes so tests can check that invalid input never reaches storage.
    #[derive(Default)]
    struct CountingRepo {
        writes: Cell<usize>,
    }

    impl VisitRecordRepository for CountingRepo {
        fn list(&self, _year: i32) -> Result<Vec<VisitRecord>> {
            Ok(Vec::new())
        }
        fn upsert(&self, record: VisitRecord) -> Result<VisitRecord> {
            self.writes.set(self.writes.get() + 1);
            Ok(record)
        }
    }

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    fn memory_service() -> LedgerService<InMemoryVisitRecordRepository> {
        LedgerService::new(InMemoryVisitRecordRepository::new(), ContributionRate::default())
            .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_rate() {
        let rate = ContributionRate::flat(Decimal::ZERO, dec(1, 1), dec(1, 1));
        let result = LedgerService::new(InMemoryVisitRecordRepository::new(), rate);
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_upsert_then_read_supersedes() {
        let service = memory_service();
        service.upsert_month(2024, 0, 1).unwrap();
        service.upsert_month(2024, 0, 2).unwrap();

        let effective = service.effective_record(2024, 0).unwrap();
        assert_eq!(effective.visits, Visits::Twice);
        assert_eq!(effective.employer, dec(9620, 2));
        assert_eq!(effective.employee, dec(3120, 2));
    }

    #[test]
    fn test_upsert_same_value_twice_is_stable() {
        let service = memory_service();
        let first = service.upsert_month(2024, 3, 1).unwrap();
        let after_first = service.effective_record(2024, 3).unwrap();
        let second = service.upsert_month(2024, 3, 1).unwrap();
        let after_second = service.effective_record(2024, 3).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_upsert_leaves_other_months_alone() {
        let service = memory_service();
        service.upsert_month(2024, 1, 2).unwrap();
        let before = service.year_view(2024).unwrap();
        service.upsert_month(2024, 4, 1).unwrap();
        let after = service.year_view(2024).unwrap();

        for month in 0..12 {
            if month != 4 {
                assert_eq!(before.month(month), after.month(month));
            }
        }
        assert_eq!(after.month(4).unwrap().visits, Visits::Once);
    }

    #[test]
    fn test_effective_record_defaults_to_sentinel() {
        let service = memory_service();
        assert!(service.effective_record(2024, 7).unwrap().is_empty());
    }

    #[test]
    fn test_year_view_is_repeatable() {
        let service = memory_service();
        service.upsert_month(2024, 0, 2).unwrap();
        assert_eq!(service.year_view(2024).unwrap(), service.year_view(2024).unwrap());
        assert!(service.year_view(2023).unwrap().months.iter().all(|m| m.is_empty()));
    }

    #[test]
    fn test_invalid_input_never_written() {
        let service =
            LedgerService::new(CountingRepo::default(), ContributionRate::default()).unwrap();
        assert!(service.upsert_month(2024, 0, 3).unwrap_err().is_validation());
        assert!(service.upsert_month(2024, 12, 1).unwrap_err().is_validation());
        assert_eq!(service.repository().writes.get(), 0);
    }

    #[test]
    fn test_persistence_failures_surface() {
        let service = LedgerService::new(FailingRepo, ContributionRate::default()).unwrap();
        assert!(service.upsert_month(2024, 0, 1).unwrap_err().is_persistence());
        assert!(service.year_view(2024).unwrap_err().is_persistence());
        assert!(service.effective_record(2024, 0).unwrap_err().is_persistence());
    }

    #[test]
    fn test_summary_scenario() {
        let service = memory_service();
        service.upsert_month(2024, 0, 1).unwrap();
        service.upsert_month(2024, 2, 2).unwrap();
        service.upsert_month(2024, 5, 0).unwrap();

        let summary = service.summary(2024, [0, 2, 5]).unwrap();
        assert_eq!(summary.total_employer, dec(14430, 2));
        assert_eq!(summary.total_employee, dec(4680, 2));
        assert_eq!(summary.included_count, 3);
    }

    #[test]
    fn test_stored_amounts_not_recomputed_with_new_rate() {
        let dir = tempdir().unwrap();
        let repo = FileVisitRecordRepository::new(dir.path(), "default").unwrap();
        LedgerService::new(repo.clone(), ContributionRate::default())
            .unwrap()
            .upsert_month(2024, 0, 1)
            .unwrap();

        let doubled = ContributionRate::flat(dec(520, 0), dec(185, 3), dec(6, 2));
        let service = LedgerService::new(repo, doubled).unwrap();
        assert_eq!(service.effective_record(2024, 0).unwrap().employer, dec(4810, 2));
    }

    #[test]
    fn test_file_and_memory_stores_agree() {
        let dir = tempdir().unwrap();
        let file = LedgerService::new(
            FileVisitRecordRepository::new(dir.path(), "default").unwrap(),
            ContributionRate::default(),
        )
        .unwrap();
        let memory = memory_service();

        for (month, visits) in [(0, 1), (0, 2), (6, 1), (6, 0), (11, 2)] {
            file.upsert_month(2024, month, visits).unwrap();
            memory.upsert_month(2024, month, visits).unwrap();
        }
        assert_eq!(file.year_view(2024).unwrap(), memory.year_view(2024).unwrap());
    }
}

//! Monthly visit records and the employer/employee contribution split
//! derived from them.

pub mod aggregate;
pub mod calculator;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod repository;
pub mod service;
pub mod session;

pub use aggregate::{aggregate, effective_record, year_view};
pub use calculator::{compute_contribution, contribution_for, round2};
pub use config::{resolve_data_dir, AppConfig, ConfigStore};
pub use error::LedgerError;
pub use format::{format_amount, format_money, month_name, parse_month, recent_years};
pub use model::{
    Contribution, ContributionRate, MonthContribution, MonthSelection, SelectionState, Summary,
    VisitRecord, Visits, YearView, MONTHS_PER_YEAR,
};
pub use repository::{
    FileVisitRecordRepository, InMemoryVisitRecordRepository, VisitRecordRepository,
};
pub use service::LedgerService;
pub use session::{EditState, Session};

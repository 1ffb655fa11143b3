pub mod contribution;
pub mod rate;
pub mod record;
pub mod selection;
pub mod summary;
pub mod visits;
pub mod year_view;

pub use contribution::{Contribution, MonthContribution};
pub use rate::ContributionRate;
pub use record::{check_month, VisitRecord, MONTHS_PER_YEAR};
pub use selection::{MonthSelection, SelectionState};
pub use summary::Summary;
pub use visits::Visits;
pub use year_view::YearView;

use tracing::debug;

use crate::aggregate;
use crate::error::LedgerError;
use crate::model::{
    check_month, MonthContribution, MonthSelection, Summary, VisitRecord, Visits, YearView,
};
use crate::repository::VisitRecordRepository;
use crate::service::LedgerService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    /// Working copy of the visit count for `month`.
    Editing { month: u32, visits: Visits },
}

/// Interactive state of one user session: active year, included months,
/// the month being edited and the last view that loaded successfully.
///
/// Failed loads and saves leave all of it untouched.
pub struct Session<R: VisitRecordRepository> {
    service: LedgerService<R>,
    year: i32,
    selection: MonthSelection,
    edit: EditState,
    view: YearView,
}

impl<R: VisitRecordRepository> Session<R> {
    pub fn open(service: LedgerService<R>, year: i32) -> Result<Self, LedgerError> {
        let view = service.year_view(year)?;
        Ok(Self {
            service,
            year,
            selection: MonthSelection::new(),
            edit: EditState::Idle,
            view,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn view(&self) -> &YearView {
        &self.view
    }

    pub fn selection(&self) -> &MonthSelection {
        &self.selection
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    pub fn service(&self) -> &LedgerService<R> {
        &self.service
    }

    /// Switches the active year. The selection is cleared since it refers
    /// to the previous year's months.
    pub fn set_year(&mut self, year: i32) -> Result<(), LedgerError> {
        if year == self.year {
            return Ok(());
        }
        let view = self.service.year_view(year)?;
        debug!(from = self.year, to = year, "switched year");
        self.year = year;
        self.view = view;
        self.selection.clear();
        self.edit = EditState::Idle;
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<(), LedgerError> {
        self.view = self.service.year_view(self.year)?;
        Ok(())
    }

    pub fn toggle_month(&mut self, month: u32) -> bool {
        self.selection.toggle(month)
    }

    /// The "all months" checkbox: checking includes every month,
    /// unchecking includes none.
    pub fn set_all_months(&mut self, checked: bool) {
        self.selection.set_all(checked);
    }

    /// Opens the editor on `month`, pre-filled from the current view.
    /// Editing another month while already editing simply retargets.
    pub fn begin_edit(&mut self, month: u32) -> Result<(), LedgerError> {
        let month = check_month(month)?;
        let visits = self
            .view
            .month(month)
            .map(|m| m.visits)
            .unwrap_or_default();
        self.edit = EditState::Editing { month, visits };
        Ok(())
    }

    /// Updates the working copy. Returns false when nothing is being edited.
    pub fn set_working_visits(&mut self, visits: Visits) -> bool {
        match &mut self.edit {
            EditState::Editing { visits: working, .. } => {
                *working = visits;
                true
            }
            EditState::Idle => false,
        }
    }

    /// Commits the working copy. Returns `None` when idle. On failure the
    /// editor stays open with its working copy.
    pub fn save_edit(&mut self) -> Result<Option<VisitRecord>, LedgerError> {
        let EditState::Editing { month, visits } = self.edit else {
            return Ok(None);
        };
        let record = self.service.upsert_month(self.year, month, visits.count())?;
        self.view.months[month as usize] = MonthContribution::from(&record);
        self.edit = EditState::Idle;
        Ok(Some(record))
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    pub fn summary(&self) -> Summary {
        aggregate::aggregate(self.selection.iter(), self.view.as_slice())
    }
}

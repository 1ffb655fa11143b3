use chrono::{Datelike, Local};
use ratatui::widgets::TableState;
use visitledger_core::{
    month_name, recent_years, EditState, SelectionState, Session, VisitRecordRepository, Visits,
    MONTHS_PER_YEAR,
};

const YEAR_CHOICES: usize = 5;

pub struct App<R: VisitRecordRepository> {
    pub session: Session<R>,
    pub state: TableState,
    pub currency_symbol: String,
    pub years: Vec<i32>,
    /// Last message for the footer, usually an error.
    pub status: Option<String>,
}

impl<R: VisitRecordRepository> App<R> {
    pub fn new(session: Session<R>, currency_symbol: String) -> Self {
        let mut state = TableState::default();
        state.select(Some(0));
        App {
            session,
            state,
            currency_symbol,
            years: recent_years(Local::now().year(), YEAR_CHOICES),
            status: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.session.edit_state(), EditState::Editing { .. })
    }

    pub fn selected_month(&self) -> u32 {
        self.state.selected().unwrap_or(0) as u32
    }

    pub fn next(&mut self) {
        let i = (self.selected_month() + 1) % MONTHS_PER_YEAR;
        self.state.select(Some(i as usize));
    }

    pub fn previous(&mut self) {
        let i = (self.selected_month() + MONTHS_PER_YEAR - 1) % MONTHS_PER_YEAR;
        self.state.select(Some(i as usize));
    }

    pub fn toggle_selected(&mut self) {
        let month = self.selected_month();
        self.session.toggle_month(month);
    }

    /// The header checkbox: anything short of all selects all.
    pub fn toggle_all(&mut self) {
        let checked = self.session.selection().state() != SelectionState::All;
        self.session.set_all_months(checked);
    }

    pub fn previous_year(&mut self) {
        let oldest = self.years.last().copied().unwrap_or(i32::MIN);
        let year = self.session.year();
        if year > oldest {
            self.switch_year(year - 1);
        }
    }

    pub fn next_year(&mut self) {
        let newest = self.years.first().copied().unwrap_or(i32::MAX);
        let year = self.session.year();
        if year < newest {
            self.switch_year(year + 1);
        }
    }

    fn switch_year(&mut self, year: i32) {
        match self.session.set_year(year) {
            Ok(()) => self.status = None,
            Err(e) => self.status = Some(format!("Could not load {}: {}", year, e)),
        }
    }

    pub fn refresh(&mut self) {
        match self.session.refresh() {
            Ok(()) => self.status = None,
            Err(e) => self.status = Some(format!("Reload failed: {}", e)),
        }
    }

    pub fn begin_edit(&mut self) {
        let month = self.selected_month();
        if let Err(e) = self.session.begin_edit(month) {
            self.status = Some(e.to_string());
        }
    }

    pub fn working_visits(&self) -> Option<Visits> {
        match self.session.edit_state() {
            EditState::Editing { visits, .. } => Some(visits),
            EditState::Idle => None,
        }
    }

    pub fn edit_next(&mut self) {
        if let Some(visits) = self.working_visits() {
            self.session.set_working_visits(visits.next());
        }
    }

    pub fn edit_previous(&mut self) {
        if let Some(visits) = self.working_visits() {
            self.session.set_working_visits(visits.previous());
        }
    }

    pub fn edit_set(&mut self, visits: Visits) {
        self.session.set_working_visits(visits);
    }

    pub fn save_edit(&mut self) {
        match self.session.save_edit() {
            Ok(Some(record)) => {
                let month = month_name(record.month);
                self.status = Some(format!("Saved {}: {}", month, record.visits));
            }
            Ok(None) => {}
            Err(e) => self.status = Some(format!("Save failed: {}", e)),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitledger_core::{ContributionRate, InMemoryVisitRecordRepository, LedgerService};

    fn app() -> App<InMemoryVisitRecordRepository> {
        let repo = InMemoryVisitRecordRepository::new();
        let service = LedgerService::new(repo, ContributionRate::default()).unwrap();
        let year = Local::now().year();
        App::new(Session::open(service, year).unwrap(), "₪".to_string())
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous();
        assert_eq!(app.selected_month(), 11);
        app.next();
        assert_eq!(app.selected_month(), 0);
    }

    #[test]
    fn test_edit_flow() {
        let mut app = app();
        app.next();
        app.begin_edit();
        assert!(app.is_editing());
        app.edit_next();
        app.edit_next();
        app.save_edit();

        assert!(!app.is_editing());
        assert_eq!(app.session.view().month(1).unwrap().visits, Visits::Twice);
    }

    #[test]
    fn test_toggle_all_from_partial_selects_all() {
        let mut app = app();
        app.toggle_selected();
        app.toggle_all();
        assert_eq!(app.session.selection().state(), SelectionState::All);
        app.toggle_all();
        assert_eq!(app.session.selection().state(), SelectionState::None);
    }

    #[test]
    fn test_year_picker_bounds() {
        let mut app = app();
        let current = app.session.year();
        app.next_year();
        assert_eq!(app.session.year(), current);
        for _ in 0..10 {
            app.previous_year();
        }
        assert_eq!(app.session.year(), current - 4);
    }
}

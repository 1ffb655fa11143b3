pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use visitledger_core::{Session, VisitRecordRepository, Visits};

use crate::tui::app::App;

pub fn run<R: VisitRecordRepository>(session: Session<R>, currency_symbol: String) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, currency_symbol);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, R: VisitRecordRepository>(
    terminal: &mut Terminal<B>,
    app: &mut App<R>,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.is_editing() {
            match key.code {
                KeyCode::Enter => app.save_edit(),
                KeyCode::Esc => app.cancel_edit(),
                KeyCode::Down | KeyCode::Char('j') => app.edit_next(),
                KeyCode::Up | KeyCode::Char('k') => app.edit_previous(),
                KeyCode::Char('0') => app.edit_set(Visits::None),
                KeyCode::Char('1') => app.edit_set(Visits::Once),
                KeyCode::Char('2') => app.edit_set(Visits::Twice),
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Left | KeyCode::Char('h') => app.previous_year(),
                KeyCode::Right | KeyCode::Char('l') => app.next_year(),
                KeyCode::Char(' ') => app.toggle_selected(),
                KeyCode::Char('a') => app.toggle_all(),
                KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
                KeyCode::Char('r') => app.refresh(),
                _ => {}
            }
        }
    }
}

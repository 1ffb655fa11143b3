use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table},
    Frame,
};
use visitledger_core::{
    format_amount, format_money, month_name, EditState, SelectionState, VisitRecordRepository,
    Visits, MONTHS_PER_YEAR,
};

use crate::tui::app::App;

pub fn draw<R: VisitRecordRepository>(f: &mut Frame, app: &mut App<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(34)])
        .split(main_chunks[1]);

    draw_month_table(f, app, content_chunks[0]);
    draw_summary(f, app, content_chunks[1]);

    let status = Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(status, main_chunks[2]);

    let help = if app.is_editing() {
        "j/k or 0-2: Visits | Enter: Save | Esc: Cancel"
    } else {
        "j/k: Month | h/l: Year | Space: Include | a: All | e: Edit | r: Reload | q: Quit"
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);

    if let EditState::Editing { month, visits } = app.session.edit_state() {
        draw_edit_dialog(f, month, visits, size);
    }
}

fn draw_header<R: VisitRecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let year = app.session.year();
    let oldest = app.years.last().copied().unwrap_or(year);
    let newest = app.years.first().copied().unwrap_or(year);
    let arrow = |enabled: bool| {
        Style::default().fg(if enabled { Color::White } else { Color::DarkGray })
    };

    let title = Line::from(vec![
        Span::styled(
            "VISIT LEDGER  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" < ", arrow(year > oldest)),
        Span::styled(year.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" > ", arrow(year < newest)),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_month_table<R: VisitRecordRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let selection = app.session.selection();
    let rows: Vec<Row> = app
        .session
        .view()
        .iter()
        .map(|(month, c)| {
            let include = if selection.contains(month) { "[x]" } else { "[ ]" };
            let visits_style = match c.visits {
                Visits::None => Style::default().fg(Color::DarkGray),
                Visits::Once | Visits::Twice => Style::default(),
            };
            Row::new(vec![
                Span::raw(month_name(month)),
                Span::raw(include),
                Span::styled(c.visits.count().to_string(), visits_style),
                Span::raw(format!("{:>10}", format_amount(c.employer))),
                Span::raw(format!("{:>10}", format_amount(c.employee))),
            ])
        })
        .collect();

    let all_box = match selection.state() {
        SelectionState::All => "[x]",
        SelectionState::Partial => "[-]",
        SelectionState::None => "[ ]",
    };
    let title = format!(" Monthly Overview  {} All months ", all_box);

    let table = Table::new(
        rows,
        [
            Constraint::Length(10), // Month
            Constraint::Length(5),  // Include
            Constraint::Length(6),  // Visits
            Constraint::Length(12), // Employer
            Constraint::Length(12), // Employee
        ],
    )
    .header(
        Row::new(vec![
            "Month".to_string(),
            "Inc".to_string(),
            "Visits".to_string(),
            format!("Employer {}", app.currency_symbol),
            format!("Employee {}", app.currency_symbol),
        ])
        .style(Style::default().fg(Color::Yellow)),
    )
    .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_summary<R: VisitRecordRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let summary = app.session.summary();
    let symbol = app.currency_symbol.as_str();
    let label = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
    };
    let value = |text: String| {
        Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
    };

    let lines = vec![
        label("Employer Total Contribution"),
        value(format_money(summary.total_employer, symbol)),
        Line::from(""),
        label("Employee Total Contribution"),
        value(format_money(summary.total_employee, symbol)),
        Line::from(""),
        label("Total Contributions"),
        value(format_money(summary.total_combined, symbol)),
        Line::from(""),
        label("Months Included"),
        value(format!("{} / {}", summary.included_count, MONTHS_PER_YEAR)),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Summary for {} ", app.session.year()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(panel, area);
}

fn draw_edit_dialog(f: &mut Frame, month: u32, current: Visits, area: Rect) {
    let popup = centered_rect(30, 7, area);

    let lines: Vec<Line> = Visits::ALL
        .iter()
        .map(|v| {
            if *v == current {
                Line::from(Span::styled(
                    format!("> {} ({})", v.label(), v.count()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {} ({})", v.label(), v.count()))
            }
        })
        .collect();

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Edit {} ", month_name(month)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Color, Style};
use tabled::{Table, Tabled};
use visitledger_core::{format_amount, format_money, month_name, Summary, YearView, MONTHS_PER_YEAR};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Visits")]
    visits: String,
    #[tabled(rename = "Employer Share")]
    employer: String,
    #[tabled(rename = "Employee Share")]
    employee: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Amount")]
    value: String,
}

pub fn print_year(view: &YearView, symbol: &str) {
    let rows: Vec<MonthRow> = view
        .iter()
        .map(|(month, c)| MonthRow {
            month: month_name(month).to_string(),
            visits: format!("{} ({})", c.visits.count(), c.visits),
            employer: format_amount(c.employer),
            employee: format_amount(c.employee),
        })
        .collect();

    println!("\x1b[1;36mMonthly Overview {}\x1b[0m ({})", view.year, symbol);
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Rows::first(), Color::FG_CYAN)
        .modify(Columns::new(2..), Alignment::right());
    println!("{}", table);
}

pub fn print_summary(year: i32, summary: &Summary, symbol: &str) {
    let rows = vec![
        SummaryRow {
            label: "Employer Total Contribution".to_string(),
            value: format_money(summary.total_employer, symbol),
        },
        SummaryRow {
            label: "Employee Total Contribution".to_string(),
            value: format_money(summary.total_employee, symbol),
        },
        SummaryRow {
            label: "Total Contributions".to_string(),
            value: format_money(summary.total_combined, symbol),
        },
        SummaryRow {
            label: "Months Included".to_string(),
            value: format!("{} / {}", summary.included_count, MONTHS_PER_YEAR),
        },
    ];

    println!("\x1b[1;36mSummary for {}\x1b[0m", year);
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Columns::new(1..), Alignment::right());
    println!("{}", table);
}

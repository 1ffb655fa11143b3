use chrono::Month;
use rust_decimal::Decimal;

use crate::calculator::round2;
use crate::error::LedgerError;
use crate::model::{check_month, MONTHS_PER_YEAR};

/// Two decimal places, always.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round2(amount))
}

pub fn format_money(amount: Decimal, symbol: &str) -> String {
    format!("{} {}", format_amount(amount), symbol)
}

/// English name for a zero-based month index.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("?")
}

/// Parses a month given as 1-12 or an English name (three letters or more)
/// into a zero-based index.
pub fn parse_month(input: &str) -> Result<u32, LedgerError> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        if number == 0 {
            return Err(LedgerError::Validation("months are numbered 1 to 12".to_string()));
        }
        return check_month(number - 1);
    }

    let lower = trimmed.to_lowercase();
    if lower.len() >= 3 {
        let found = (0..MONTHS_PER_YEAR)
            .find(|m| month_name(*m).to_lowercase().starts_with(&lower));
        if let Some(month) = found {
            return Ok(month);
        }
    }
    Err(LedgerError::Validation(format!("unknown month '{}'", trimmed)))
}

/// The year picker: `current` and the `count - 1` years before it.
pub fn recent_years(current: i32, count: usize) -> Vec<i32> {
    (0..count as i32).map(|offset| current - offset).collect()
}

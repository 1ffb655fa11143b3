use std::collections::BTreeSet;

use crate::model::record::MONTHS_PER_YEAR;

/// Tri-state of the "select all months" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

/// Months included in the summary. Indices outside 0..=11 are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthSelection {
    months: BTreeSet<u32>,
}

impl MonthSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        (0..MONTHS_PER_YEAR).collect()
    }

    pub fn contains(&self, month: u32) -> bool {
        self.months.contains(&month)
    }

    /// Flips one month. Returns whether it is included afterwards.
    pub fn toggle(&mut self, month: u32) -> bool {
        if month >= MONTHS_PER_YEAR {
            return false;
        }
        if !self.months.remove(&month) {
            self.months.insert(month);
            return true;
        }
        false
    }

    pub fn select_all(&mut self) {
        self.months = (0..MONTHS_PER_YEAR).collect();
    }

    pub fn clear(&mut self) {
        self.months.clear();
    }

    /// Checkbox semantics: checking selects every month, unchecking clears.
    pub fn set_all(&mut self, checked: bool) {
        if checked {
            self.select_all();
        } else {
            self.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn state(&self) -> SelectionState {
        match self.months.len() {
            0 => SelectionState::None,
            n if n == MONTHS_PER_YEAR as usize => SelectionState::All,
            _ => SelectionState::Partial,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.months.iter().copied()
    }
}

impl FromIterator<u32> for MonthSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            months: iter.into_iter().filter(|m| *m < MONTHS_PER_YEAR).collect(),
        }
    }
}

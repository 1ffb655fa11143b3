use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Number of visits in a month. Only none, once or twice is meaningful.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Visits {
    #[default]
    None,
    Once,
    Twice,
}

impl Visits {
    pub const ALL: [Visits; 3] = [Visits::None, Visits::Once, Visits::Twice];

    pub fn count(self) -> u8 {
        match self {
            Visits::None => 0,
            Visits::Once => 1,
            Visits::Twice => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visits::None => "None",
            Visits::Once => "Once",
            Visits::Twice => "Twice",
        }
    }

    /// Next value in the picker, saturating at `Twice`.
    pub fn next(self) -> Self {
        match self {
            Visits::None => Visits::Once,
            Visits::Once | Visits::Twice => Visits::Twice,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Visits::Twice => Visits::Once,
            Visits::Once | Visits::None => Visits::None,
        }
    }
}

impl TryFrom<u8> for Visits {
    type Error = LedgerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Visits::None),
            1 => Ok(Visits::Once),
            2 => Ok(Visits::Twice),
            other => Err(LedgerError::Validation(format!(
                "visit count must be 0, 1 or 2 (got {})",
                other
            ))),
        }
    }
}

impl From<Visits> for u8 {
    fn from(visits: Visits) -> Self {
        visits.count()
    }
}

impl fmt::Display for Visits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

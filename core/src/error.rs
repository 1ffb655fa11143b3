use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence failed: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}


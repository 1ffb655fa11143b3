use std::sync::Mutex;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::model::VisitRecord;
use crate::repository::traits::VisitRecordRepository;

/// Append-only in-process log. Superseded records stay in the log and are
/// resolved by timestamp on read.
#[derive(Default)]
pub struct InMemoryVisitRecordRepository {
    records: Mutex<Vec<VisitRecord>>,
}

impl InMemoryVisitRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record ever written, in write order.
    pub fn history(&self) -> Result<Vec<VisitRecord>> {
        let records = self.records.lock().map_err(|_| anyhow!("record log lock poisoned"))?;
        Ok(records.clone())
    }
}

impl VisitRecordRepository for InMemoryVisitRecordRepository {
    fn list(&self, year: i32) -> Result<Vec<VisitRecord>> {
        let records = self.records.lock().map_err(|_| anyhow!("record log lock poisoned"))?;
        Ok(records.iter().filter(|r| r.year == year).cloned().collect())
    }

    fn upsert(&self, mut record: VisitRecord) -> Result<VisitRecord> {
        if record.id.is_nil() {
            record.id = Uuid::new_v4();
        }
        let mut records = self.records.lock().map_err(|_| anyhow!("record log lock poisoned"))?;
        records.push(record.clone());
        Ok(record)
    }
}

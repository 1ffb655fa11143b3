use crate::model::VisitRecord;
use anyhow::Result;

/// Storage collaborator for visit records, scoped to one owner.
pub trait VisitRecordRepository {
    /// All stored records for `year`, in no particular order.
    fn list(&self, year: i32) -> Result<Vec<VisitRecord>>;
    /// Stores `record`, assigning an id when it is nil. Returns what was stored.
    fn upsert(&self, record: VisitRecord) -> Result<VisitRecord>;
}


use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::model::VisitRecord;
use crate::repository::traits::VisitRecordRepository;

const RECORDS_FILE_NAME: &str = "records.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Serialize, Deserialize, Debug, Clone)]
struct StoredRecord {
    owner: String,
    #[serde(flatten)]
    record: VisitRecord,
}

/// JSON file store. Keeps one row per (owner, year, month); an upsert
/// replaces the owner's previous row for that month.
#[derive(Clone)]
pub struct FileVisitRecordRepository {
    file_path: PathBuf,
    owner: String,
}

impl FileVisitRecordRepository {
    pub fn new(data_dir: &Path, owner: impl Into<String>) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Could not create data directory {}", data_dir.display()))?;
        let file_path = data_dir.join(RECORDS_FILE_NAME);

        if !file_path.exists() {
            write_rows(&file_path, &[])?;
        }

        Ok(FileVisitRecordRepository {
            file_path,
            owner: owner.into(),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_rows(&self) -> Result<Vec<StoredRecord>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let rows = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse {}", self.file_path.display()))?;
        Ok(rows)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(format!("json.{}", TMP_SUFFIX))
}

// Writes to a sibling temp file, then renames over the target. The temp
// file is removed again if anything after its creation fails.
fn write_rows(path: &Path, rows: &[StoredRecord]) -> Result<()> {
    let tmp = tmp_path(path);
    let file = File::create(&tmp).with_context(|| format!("Could not create {}", tmp.display()))?;
    let result = write_and_replace(file, &tmp, path, rows);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_and_replace(file: File, tmp: &Path, path: &Path, rows: &[StoredRecord]) -> Result<()> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    drop(writer);
    fs::rename(tmp, path).with_context(|| format!("Could not replace {}", path.display()))?;
    Ok(())
}

impl VisitRecordRepository for FileVisitRecordRepository {
    fn list(&self, year: i32) -> Result<Vec<VisitRecord>> {
        let records: Vec<VisitRecord> = self
            .read_rows()?
            .into_iter()
            .filter(|row| row.owner == self.owner && row.record.year == year)
            .map(|row| row.record)
            .collect();
        debug!(owner = %self.owner, year, count = records.len(), "listed records");
        Ok(records)
    }

    fn upsert(&self, mut record: VisitRecord) -> Result<VisitRecord> {
        if record.id.is_nil() {
            record.id = Uuid::new_v4();
        }

        let mut rows = self.read_rows()?;
        let row = StoredRecord {
            owner: self.owner.clone(),
            record: record.clone(),
        };
        match rows
            .iter()
            .position(|r| r.owner == self.owner && r.record.is_for(record.year, record.month))
        {
            Some(pos) => rows[pos] = row,
            None => rows.push(row),
        }
        write_rows(&self.file_path, &rows)?;
        Ok(record)
    }
}

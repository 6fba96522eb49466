//! Result store — the append-only CSV file behind the fairness dashboard.
//!
//! Columns: `Name, Gender, Experience, Job Role, Score, Selected`. Appending
//! reads the whole file, adds one row and rewrites it through a temp file that
//! is renamed over the original. Writers inside this process are serialized;
//! nothing coordinates separate processes sharing the same file.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::interview::scoring::is_selected;
use crate::models::candidate::CandidateProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not replace results file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Result store writer lock poisoned")]
    LockPoisoned,
}

/// One row of the results file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Job Role")]
    pub job_role: String,
    #[serde(rename = "Score")]
    pub score: i64,
    #[serde(rename = "Selected", with = "selected_flag")]
    pub selected: bool,
}

impl ResultRecord {
    /// Builds the row for a scored candidate. `selected` is derived, never passed in.
    pub fn new(profile: &CandidateProfile, score: i64) -> Self {
        Self {
            name: profile.name.clone(),
            gender: profile.gender.label().to_string(),
            experience: profile.experience.label().to_string(),
            job_role: profile.job_role.clone(),
            score,
            selected: is_selected(score),
        }
    }
}

/// `Selected` is written as 0/1.
mod selected_flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(selected: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*selected))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::custom(format!(
                "Selected must be 0 or 1, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every row in file order. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<ResultRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let records = reader
            .deserialize()
            .collect::<Result<Vec<ResultRecord>, csv::Error>>()?;
        debug!("Loaded {} result rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Appends one row and returns the full table as written.
    pub fn append(&self, record: ResultRecord) -> Result<Vec<ResultRecord>, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;

        let mut records = self.load()?;
        records.push(record);
        self.rewrite(&records)?;

        info!(
            "Appended result row #{} to {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn rewrite(&self, records: &[ResultRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file());
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

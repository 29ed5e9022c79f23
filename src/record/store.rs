//! Workout store: an append-only list of records
//!
//! Append is a single read-modify-write with no locking; one writer at a time
//! is assumed.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::workout::WorkoutRecord;
use crate::error::StoreError;

pub trait WorkoutStore {
    /// Current record list
    fn load(&self) -> Result<Vec<WorkoutRecord>, StoreError>;

    /// Replace the stored list
    fn save(&mut self, records: &[WorkoutRecord]) -> Result<(), StoreError>;

    /// Append one record; returns the new list length
    fn append(&mut self, record: WorkoutRecord) -> Result<usize, StoreError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;
        Ok(records.len())
    }
}

/// History kept as a pretty-printed JSON array
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkoutStore for JsonFileStore {
    /// A missing file or corrupt JSON reads as an empty list; other I/O errors
    /// are returned so an existing file is never overwritten blind.
    fn load(&self) -> Result<Vec<WorkoutRecord>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    "Workout history at {} is unreadable ({}), starting a new list",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, records: &[WorkoutRecord]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;

        fs::write(&self.path, buf).map_err(write_err)?;
        debug!("Saved {} workout records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use super::*;

    /// In-memory store for tests
    #[derive(Default)]
    pub struct MemoryStore {
        pub records: Vec<WorkoutRecord>,
    }

    impl WorkoutStore for MemoryStore {
        fn load(&self) -> Result<Vec<WorkoutRecord>, StoreError> {
            Ok(self.records.clone())
        }

        fn save(&mut self, records: &[WorkoutRecord]) -> Result<(), StoreError> {
            self.records = records.to_vec();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, reps: u32) -> WorkoutRecord {
        WorkoutRecord {
            exercise_name: name.to_string(),
            reps,
            score: 55.5,
            calories: reps as f64 * 0.5,
            timestamp: "2026-10-16 09:30:00".to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_creates_dirs_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("database").join("workout_history.json"));

        assert_eq!(store.append(record("Bicep Curls", 1)).unwrap(), 1);
        assert_eq!(store.append(record("Squats", 10)).unwrap(), 2);

        let records = store.load().unwrap();
        assert_eq!(records, vec![record("Bicep Curls", 1), record("Squats", 10)]);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n        \"exercise_name\": \"Bicep Curls\""));
    }

    #[test]
    fn test_corrupt_file_restarts_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout_history.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.append(record("Lunges", 4)).unwrap(), 1);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        let path = dir.path().join("history.json");
        fs::create_dir(&path).unwrap();

        let mut store = JsonFileStore::new(&path);
        let err = store.save(&[record("Planks", 2)]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        assert!(matches!(store.load(), Err(StoreError::Read { .. })));
        assert!(store.append(record("Deadlifts", 1)).is_err());
    }

    #[test]
    fn test_memory_store_append() {
        let mut store = MemoryStore::default();
        store.append(record("Push-ups", 3)).unwrap();
        assert_eq!(store.records.len(), 1);
    }
}

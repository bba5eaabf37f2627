// src/db/mod.rs
//
// File-backed "database": a JSON array of loads and an append-only JSONL log of
// call outcomes. Both are re-read on every request.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;
use crate::models::{CallOutcome, Load};

pub trait LoadCatalog: Send + Sync {
    fn read_all(&self) -> Result<Vec<Load>, StorageError>;
}

/// Append-only call history. Entries are never updated or removed.
pub trait CallLog: Send + Sync {
    fn read_all(&self) -> Result<Vec<CallOutcome>, StorageError>;
    fn append(&self, outcome: &CallOutcome) -> Result<(), StorageError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// File implementations
// ─────────────────────────────────────────────────────────────────────────────

pub struct JsonLoadCatalog {
    path: PathBuf,
}

impl JsonLoadCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LoadCatalog for JsonLoadCatalog {
    fn read_all(&self) -> Result<Vec<Load>, StorageError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

pub struct JsonlCallLog {
    path: PathBuf,
    // serialises appends from this process; readers never take it
    append_lock: Mutex<()>,
}

impl JsonlCallLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CallLog for JsonlCallLog {
    fn read_all(&self) -> Result<Vec<CallOutcome>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_err(e))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CallOutcome>(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = idx + 1,
                    error = %e,
                    "skipping malformed call log line"
                ),
            }
        }
        Ok(records)
    }

    fn append(&self, outcome: &CallOutcome) -> Result<(), StorageError> {
        // Encode first so a bad record never touches the file.
        let mut line = serde_json::to_string(outcome)?;
        line.push('\n');

        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        file.write_all(line.as_bytes()).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory implementations (router tests)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemoryLoadCatalog {
    loads: Vec<Load>,
}

#[cfg(test)]
impl MemoryLoadCatalog {
    pub fn new(loads: Vec<Load>) -> Self {
        Self { loads }
    }
}

#[cfg(test)]
impl LoadCatalog for MemoryLoadCatalog {
    fn read_all(&self) -> Result<Vec<Load>, StorageError> {
        Ok(self.loads.clone())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryCallLog {
    entries: Mutex<Vec<CallOutcome>>,
}

#[cfg(test)]
impl MemoryCallLog {
    pub fn new(entries: Vec<CallOutcome>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[cfg(test)]
impl CallLog for MemoryCallLog {
    fn read_all(&self) -> Result<Vec<CallOutcome>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(entries.clone())
    }

    fn append(&self, outcome: &CallOutcome) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.push(outcome.clone());
        Ok(())
    }
}

//! Citizen directory and login.
//!
//! Records are `citizen_id -> name`, loaded once and read-only afterwards.
//! The CSV layout is a header row with at least `citizen_id` and `name`
//! columns; other columns are ignored.

use crate::error::{CivicError, LoginError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Citizen identifier as typed at login
pub type CitizenId = i64;

/// Read-only lookup of citizen names by identifier
pub trait CitizenDirectory {
    fn name_for(&self, id: CitizenId) -> Option<&str>;

    fn exists(&self, id: CitizenId) -> bool {
        self.name_for(id).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A logged-in citizen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citizen {
    pub id: CitizenId,
    pub name: String,
}

/// Directory built from explicit records
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    names: BTreeMap<CitizenId, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, name)` pairs, rejecting repeated ids
    pub fn from_records<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CitizenId, S)>,
        S: Into<String>,
    {
        let mut names = BTreeMap::new();
        for (id, name) in records {
            if names.insert(id, name.into()).is_some() {
                return Err(CivicError::DuplicateCitizen(id));
            }
        }
        Ok(Self { names })
    }
}

impl CitizenDirectory for InMemoryDirectory {
    fn name_for(&self, id: CitizenId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

#[derive(Debug, Deserialize)]
struct CitizenRow {
    citizen_id: CitizenId,
    name: String,
}

/// Directory loaded from a CSV file
#[derive(Debug, Clone)]
pub struct CsvCitizenStore {
    inner: InMemoryDirectory,
}

impl CsvCitizenStore {
    pub fn load(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let store = Self::from_reader(reader)?;
        info!(path = %path.display(), citizens = store.len(), "loaded citizen records");
        Ok(store)
    }

    /// Parse records from any CSV source
    pub fn from_csv_str(data: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        Self::from_reader(reader)
    }

    fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let row: CitizenRow = row?;
            records.push((row.citizen_id, row.name));
        }
        Ok(Self {
            inner: InMemoryDirectory::from_records(records)?,
        })
    }
}

impl CitizenDirectory for CsvCitizenStore {
    fn name_for(&self, id: CitizenId) -> Option<&str> {
        self.inner.name_for(id)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Validate a typed identifier against the directory
pub fn login<D: CitizenDirectory + ?Sized>(
    raw: &str,
    directory: &D,
) -> std::result::Result<Citizen, LoginError> {
    let id: CitizenId = raw.trim().parse().map_err(|_| LoginError::NotANumber)?;

    match directory.name_for(id) {
        Some(name) => {
            debug!(id, "login accepted");
            Ok(Citizen {
                id,
                name: name.to_string(),
            })
        }
        None => {
            debug!(id, "login rejected: unknown id");
            Err(LoginError::UnknownId(id))
        }
    }
}

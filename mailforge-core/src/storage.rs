//! Persistence - Repositories for brand kits and drafts
//!
//! The renderer and checker never touch storage; callers load a record,
//! pass it by value, and save whatever they change.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::brand::BrandKit;
use crate::document::EmailDocument;

pub const BRAND_KITS_KEY: &str = "email-gen-brand-kits";
pub const DRAFTS_KEY: &str = "email-gen-drafts";

const DEFAULT_KIT_NAME: &str = "Mi Primera Marca";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record id is empty")]
    MissingRecordId,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt store {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Anything a repository can hold.
pub trait Record: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    /// Refresh the modification timestamp.
    fn touch(&mut self);
}

impl Record for BrandKit {
    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for EmailDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// get/list/put/delete by id. `put` upserts and returns the stored record;
/// `delete` reports whether anything was removed.
pub trait Repository<T: Record> {
    fn get(&self, id: &str) -> StorageResult<Option<T>>;
    fn list(&self) -> StorageResult<Vec<T>>;
    fn put(&mut self, record: T) -> StorageResult<T>;
    fn delete(&mut self, id: &str) -> StorageResult<bool>;
}

/// The kit seeded into an empty brand-kit store.
pub fn default_brand_kit() -> BrandKit {
    BrandKit {
        name: DEFAULT_KIT_NAME.to_string(),
        ..BrandKit::default()
    }
}

fn upsert<T: Record>(records: &mut Vec<T>, mut record: T) -> StorageResult<T> {
    if record.id().is_empty() {
        return Err(StorageError::MissingRecordId);
    }
    record.touch();
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
    Ok(record)
}

fn remove<T: Record>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

// --- In-memory ---

#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: &str) -> StorageResult<Option<T>> {
        Ok(self.records.iter().find(|r| r.id() == id).cloned())
    }

    fn list(&self) -> StorageResult<Vec<T>> {
        Ok(self.records.clone())
    }

    fn put(&mut self, record: T) -> StorageResult<T> {
        upsert(&mut self.records, record)
    }

    fn delete(&mut self, id: &str) -> StorageResult<bool> {
        Ok(remove(&mut self.records, id))
    }
}

// --- JSON file ---

/// One JSON array per collection. A missing file reads as the seed list.
#[derive(Debug, Clone)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    seed: Vec<T>,
}

impl<T: Record> JsonFileRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self { path, seed: Vec::new() }
    }

    pub fn with_seed(path: PathBuf, seed: Vec<T>) -> Self {
        Self { path, seed }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<Vec<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(self.seed.clone()),
            Err(err) => return Err(StorageError::Io(err)),
        };
        serde_json::from_str(&content).map_err(|source| {
            tracing::warn!(%source, path = ?self.path, "store is not valid JSON");
            StorageError::Corrupt { path: self.path.clone(), source }
        })
    }

    fn save(&self, records: &[T]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        tracing::debug!(path = ?self.path, count = records.len(), "store saved");
        Ok(())
    }
}

impl JsonFileRepository<BrandKit> {
    /// Brand-kit store under `dir`, seeded with the default kit.
    pub fn brand_kits(dir: &Path) -> Self {
        Self::with_seed(dir.join(format!("{}.json", BRAND_KITS_KEY)), vec![default_brand_kit()])
    }
}

impl JsonFileRepository<EmailDocument> {
    pub fn drafts(dir: &Path) -> Self {
        Self::new(dir.join(format!("{}.json", DRAFTS_KEY)))
    }
}

impl<T: Record> Repository<T> for JsonFileRepository<T> {
    fn get(&self, id: &str) -> StorageResult<Option<T>> {
        Ok(self.load()?.into_iter().find(|r| r.id() == id))
    }

    fn list(&self) -> StorageResult<Vec<T>> {
        self.load()
    }

    fn put(&mut self, record: T) -> StorageResult<T> {
        let mut records = self.load()?;
        let stored = upsert(&mut records, record)?;
        self.save(&records)?;
        Ok(stored)
    }

    fn delete(&mut self, id: &str) -> StorageResult<bool> {
        let mut records = self.load()?;
        if !remove(&mut records, id) {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }
}

//! File-backed spot storage.
//!
//! [`SpotStore`] treats a single JSON document as a one-table database. Every
//! operation runs a complete cycle under one process-wide lock:
//!
//! 1. load the document from disk (a missing file is an empty document)
//! 2. read or modify it in memory
//! 3. for mutations, write the whole document back
//!
//! Nothing is cached between calls, so edits made to the file by hand are
//! picked up on the next request.
//!
//! ## Limitations
//!
//! The lock only serialises callers inside this process. Two processes writing
//! the same file can still race, and writes are plain overwrites with no
//! rename step, so a crash mid-write can truncate the document.

use crate::config::CoreConfig;
use crate::spot::{DetailSection, Document, SpotRecord};
use crate::validation::{lookup_key, normalise_record_id};
use crate::{StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lock-serialised CRUD access to the spots document.
///
/// Cheap to share: wrap in an `Arc` and hand the same instance to every request handler so
/// they contend on a single lock.
#[derive(Debug)]
pub struct SpotStore {
    cfg: Arc<CoreConfig>,
    lock: Mutex<()>,
}

impl SpotStore {
    /// Creates a store over the data file named by `cfg`.
    ///
    /// The file is not touched until the first operation.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            lock: Mutex::new(()),
        }
    }

    pub fn data_file(&self) -> &Path {
        self.cfg.data_file()
    }

    /// Returns every spot in document order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be read or decoded.
    pub fn list_spots(&self) -> StorageResult<Vec<SpotRecord>> {
        let _guard = self.acquire();
        Ok(self.load()?.spots)
    }

    /// Looks up a spot by id, ignoring case and surrounding whitespace.
    ///
    /// A missing spot is `Ok(None)`, not an error.
    pub fn get_spot(&self, spot_id: &str) -> StorageResult<Option<SpotRecord>> {
        let key = lookup_key(spot_id);
        let _guard = self.acquire();
        let document = self.load()?;
        Ok(document.spots.into_iter().find(|spot| spot.matches_key(&key)))
    }

    /// Inserts `record`, or replaces the stored record with the same id.
    ///
    /// The id is trimmed before storing. A replacement keeps the original
    /// position in the list and overwrites every field of the old record.
    ///
    /// # Returns
    ///
    /// The record as stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Validation` if the id is missing or blank, or any
    /// read/decode/write error from the document cycle.
    pub fn upsert_spot(&self, record: SpotRecord) -> StorageResult<SpotRecord> {
        let spot_id = normalise_record_id(record.get(crate::constants::ID_KEY))?;
        let record = record.with(crate::constants::ID_KEY, spot_id.as_str());
        let key = lookup_key(&spot_id);

        let _guard = self.acquire();
        let mut document = self.load()?;

        match document.position(&key) {
            Some(index) => {
                document.spots[index] = record.clone();
                tracing::info!(spot_id = %spot_id, index, "replaced spot");
            }
            None => {
                document.spots.push(record.clone());
                tracing::info!(spot_id = %spot_id, "added spot");
            }
        }

        self.write(&document)?;
        Ok(record)
    }

    /// Removes every spot whose id matches `spot_id` case-insensitively.
    ///
    /// The file is only rewritten when something was removed.
    ///
    /// # Returns
    ///
    /// `true` if at least one record was removed.
    pub fn delete_spot(&self, spot_id: &str) -> StorageResult<bool> {
        let key = lookup_key(spot_id);

        let _guard = self.acquire();
        let mut document = self.load()?;

        let before = document.spots.len();
        document.spots.retain(|spot| !spot.matches_key(&key));
        if document.spots.len() == before {
            return Ok(false);
        }

        self.write(&document)?;
        tracing::info!(spot_id = %spot_id.trim(), "deleted spot");
        Ok(true)
    }

    /// Appends `section` to the `detailSections` list of the matching spot.
    ///
    /// # Errors
    ///
    /// - `StorageError::Validation` if `spot_id` is blank.
    /// - `StorageError::NotFound` if no spot matches; the document is left unchanged.
    pub fn append_detail_section(
        &self,
        spot_id: &str,
        section: DetailSection,
    ) -> StorageResult<DetailSection> {
        let key = lookup_key(spot_id);
        if key.is_empty() {
            return Err(StorageError::validation(
                "Spot id must not be empty when adding detail section.",
            ));
        }

        let raw = serde_json::to_value(&section).map_err(StorageError::Serialization)?;

        let _guard = self.acquire();
        let mut document = self.load()?;

        let Some(index) = document.position(&key) else {
            return Err(StorageError::not_found(format!(
                "Spot '{spot_id}' not found; cannot append detail section."
            )));
        };

        document.spots[index].push_detail_section(raw)?;
        self.write(&document)?;

        tracing::info!(spot_id = %spot_id.trim(), title = %section.title, "appended detail section");
        Ok(section)
    }

    /// Takes the store lock, recovering it if a previous holder panicked.
    ///
    /// The guarded state lives on disk, so a poisoned lock carries no torn
    /// in-memory data.
    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> StorageResult<Document> {
        let path = self.cfg.data_file();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("data file {} absent, using empty document", path.display());
                return Ok(Document::default());
            }
            Err(e) => return Err(StorageError::FileRead(e)),
        };

        serde_json::from_str(&contents).map_err(|e| {
            tracing::warn!("failed to decode {}: {}", path.display(), e);
            StorageError::Decode(e)
        })
    }

    fn write(&self, document: &Document) -> StorageResult<()> {
        if let Some(dir) = self.cfg.data_dir() {
            fs::create_dir_all(dir).map_err(StorageError::DirCreation)?;
        }

        let contents =
            serde_json::to_string_pretty(document).map_err(StorageError::Serialization)?;
        fs::write(self.cfg.data_file(), contents).map_err(StorageError::FileWrite)?;

        tracing::debug!(
            spots = document.spots.len(),
            "flushed {}",
            self.cfg.data_file().display()
        );
        Ok(())
    }
}

use std::collections::HashSet;
use std::fs;
use std::hash::{DefaultHasher, Hasher};
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::item::Item;
use crate::parse::{item_from_record, record_from_item};

/// Error type for list file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed list file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not encode list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Generate a fresh item id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Canonical sort key: grouped items first, then by lowercased group and
/// text; ungrouped items last by lowercased text. Total and deterministic.
fn canonical_key(item: &Item) -> (u8, String, String) {
    match &item.group {
        Some(group) => (0, group.to_lowercase(), item.text.to_lowercase()),
        None => (1, String::new(), item.text.to_lowercase()),
    }
}

/// Sort a collection into canonical display order.
pub fn sort_canonical(items: &mut [Item]) {
    items.sort_by_key(canonical_key);
}

fn digest(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    hasher.finish()
}

/// Access to the shared list file. Tracks the content digest it last read
/// or wrote, so a session's own writes are never mistaken for external
/// changes — the digest, not the file's mtime, is the modification version.
pub struct Store {
    path: PathBuf,
    last_digest: Option<u64>,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Store {
            path,
            last_digest: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the list file. A missing file is an empty collection.
    /// Records without an id get a freshly generated one in this call only;
    /// nothing is written back (see DESIGN.md on legacy id backfill).
    pub fn load(&mut self) -> Result<Vec<Item>, StoreError> {
        let records = self.read_raw()?;
        Ok(records
            .into_iter()
            .map(|record| {
                let id = record.id.clone().unwrap_or_else(new_id);
                item_from_record(record, id)
            })
            .collect())
    }

    /// Merge-on-write: items added on disk since `candidate` was derived
    /// (ids we don't know about) are appended before the overwrite, so a
    /// session that only edits or creates never clobbers concurrent
    /// additions. Concurrent edits or deletes of the same id are not
    /// reconciled — last writer wins.
    pub fn save(&mut self, candidate: &[Item]) -> Result<(), StoreError> {
        let current = self.read_raw()?;
        let ours: HashSet<&str> = candidate.iter().map(|i| i.id.as_str()).collect();

        let mut merged: Vec<Item> = candidate.to_vec();
        for record in current {
            if let Some(id) = &record.id
                && ours.contains(id.as_str())
            {
                continue;
            }
            let id = record.id.clone().unwrap_or_else(new_id);
            merged.push(item_from_record(record, id));
        }

        sort_canonical(&mut merged);
        self.write_items(&merged, RecoveryCategory::Write)
    }

    /// Authoritative delete: fresh read, filter the id out, overwrite
    /// without the merge step. An addition landing between this read and
    /// write is dropped — the accepted race of the lock-free design.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let current = self.read_raw()?;
        let kept: Vec<Item> = current
            .into_iter()
            .filter(|record| record.id.as_deref() != Some(id))
            .map(|record| {
                let id = record.id.clone().unwrap_or_else(new_id);
                item_from_record(record, id)
            })
            .collect();
        self.write_items(&kept, RecoveryCategory::Delete)
    }

    /// Whether the file content differs from what this store last read or
    /// wrote. Cheap enough for a human-scale list; a deleted file counts as
    /// changed if we ever saw content.
    pub fn external_change(&self) -> bool {
        let current = fs::read(&self.path).ok().map(|bytes| digest(&bytes));
        current != self.last_digest
    }

    fn read_raw(&mut self) -> Result<Vec<crate::model::item::ItemRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.last_digest = None;
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        self.last_digest = Some(digest(&bytes));
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_items(&mut self, items: &[Item], category: RecoveryCategory) -> Result<(), StoreError> {
        let records: Vec<_> = items.iter().map(record_from_item).collect();
        let content = serde_json::to_string_pretty(&records)?;

        // Plain overwrite: no lock, no temp-file rename. The id merge above
        // is the only cross-session coordination.
        if let Err(e) = fs::write(&self.path, &content) {
            recovery::log_recovery(
                &self.path,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    category,
                    description: "list write failed".to_string(),
                    fields: vec![("Error".to_string(), e.to_string())],
                    body: content,
                },
            );
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: e,
            });
        }

        self.last_digest = Some(digest(content.as_bytes()));
        Ok(())
    }
}

//! Scan persistence.
//!
//! The controller only sees [`ScanRepository`]. [`LocalScanStore`] keeps every
//! record in one JSON blob under a well-known key of a [`LocalStorage`]
//! directory; [`MemoryScanStore`] is the in-process variant.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::ScanRecord;

mod local_storage;
mod memory;
mod scans;

pub use local_storage::LocalStorage;
pub use memory::MemoryScanStore;
pub use scans::{LocalScanStore, SCANS_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored data under key '{key}' is corrupted: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize scans: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Id → record mapping. Iteration order is unspecified.
pub type ScanMap = HashMap<String, ScanRecord>;

pub trait ScanRepository: Send + Sync {
    /// Inserts or overwrites the record at `record.id`.
    fn put(&self, record: ScanRecord) -> Result<(), StoreError>;

    fn get_all(&self) -> Result<ScanMap, StoreError>;

    /// Missing ids are `Ok(None)`, never an error.
    fn get_by_id(&self, id: &str) -> Result<Option<ScanRecord>, StoreError> {
        Ok(self.get_all()?.remove(id))
    }
}

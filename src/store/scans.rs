use std::sync::Mutex;

use log::debug;

use crate::log_info;
use crate::models::ScanRecord;

use super::{LocalStorage, ScanMap, ScanRepository, StoreError};

const ENABLE_LOGS: bool = true;

/// Well-known key holding the serialized id → record mapping.
pub const SCANS_KEY: &str = "letsdog_scans";

/// All scans in a single JSON blob. Every call re-reads the medium, so a blob
/// cleared or rewritten from outside is picked up on the next access.
pub struct LocalScanStore {
    storage: LocalStorage,
    write_lock: Mutex<()>,
}

impl LocalScanStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    fn read_map(&self) -> Result<ScanMap, StoreError> {
        match self.storage.get_item(SCANS_KEY)? {
            Some(blob) => serde_json::from_str(&blob).map_err(|source| StoreError::Corrupt {
                key: SCANS_KEY.to_string(),
                source,
            }),
            None => Ok(ScanMap::new()),
        }
    }
}

impl ScanRepository for LocalScanStore {
    fn put(&self, record: ScanRecord) -> Result<(), StoreError> {
        // Serializes read-modify-write within this process only.
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut scans = self.read_map()?;
        let id = record.id.clone();
        scans.insert(id.clone(), record);

        let serialized = serde_json::to_string(&scans)?;
        self.storage.set_item(SCANS_KEY, &serialized)?;

        log_info!("Stored scan #{} ({} total)", id, scans.len());
        Ok(())
    }

    fn get_all(&self) -> Result<ScanMap, StoreError> {
        let scans = self.read_map()?;
        debug!("Loaded {} scans from {}", scans.len(), self.storage.root().display());
        Ok(scans)
    }
}

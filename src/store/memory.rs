use std::sync::RwLock;

use crate::models::ScanRecord;

use super::{ScanMap, ScanRepository, StoreError};

/// Process-local store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryScanStore {
    scans: RwLock<ScanMap>,
}

impl MemoryScanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ScanMap> {
        match self.scans.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ScanRepository for MemoryScanStore {
    fn put(&self, record: ScanRecord) -> Result<(), StoreError> {
        let mut guard = match self.scans.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn get_all(&self) -> Result<ScanMap, StoreError> {
        Ok(self.read().clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<ScanRecord>, StoreError> {
        Ok(self.read().get(id).cloned())
    }
}

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::StoreError;

/// Synchronous string key-value medium backed by one file per key.
///
/// No expiry and no cross-process coordination: two processes writing the
/// same key race, and the last rename wins.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Replaces the whole value. Written to a sibling temp file and renamed
    /// so readers never observe a partial write.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::write(&tmp_path, value).map_err(io_err)?;
        fs::rename(&tmp_path, &path).map_err(io_err)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();
        assert_eq!(storage.get_item("nothing").unwrap(), None);
    }

    #[test]
    fn set_then_get_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested")).unwrap();

        storage.set_item("k", "{\"a\":1}").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{\"a\":1}"));

        storage.set_item("k", "{}").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{}"));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(storage.get_item(""), Err(StoreError::InvalidKey(_))));
    }
}

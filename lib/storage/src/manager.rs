use crate::loader::{CsvLoader, LoadOptions};
use finlens_core::{Dataset, Error, Result};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Holds the current dataset snapshot.
///
/// Readers get an `Arc<Dataset>` and keep it for the whole request; a reload
/// swaps in a new snapshot without touching the ones already handed out.
pub struct DatasetStore {
    source: Option<PathBuf>,
    loader: CsvLoader,
    current: RwLock<Arc<Dataset>>,
}

impl DatasetStore {
    /// Load `path` and keep it as the reload source
    pub fn open<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let loader = CsvLoader::new(options);
        let dataset = loader.load_path(&path)?;

        Ok(Self {
            source: Some(path),
            loader,
            current: RwLock::new(Arc::new(dataset)),
        })
    }

    /// Store an in-memory dataset with no file behind it
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            source: None,
            loader: CsvLoader::default(),
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<Dataset> {
        self.current.read().clone()
    }

    pub fn path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Re-read the source file and return the new row count.
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<usize> {
        let path = self
            .source
            .as_ref()
            .ok_or_else(|| Error::Storage("dataset has no source file".to_string()))?;
        let dataset = self.loader.load_path(path)?;
        let rows = dataset.len();
        self.replace(dataset);
        info!("Reloaded dataset from {:?}: {} rows", path, rows);
        Ok(rows)
    }

    pub fn replace(&self, dataset: Dataset) {
        *self.current.write() = Arc::new(dataset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reload_swaps_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Country,Date\nA,2024-01-01").unwrap();
        file.flush().unwrap();

        let store = DatasetStore::open(file.path(), LoadOptions::default()).unwrap();
        let before = store.snapshot();
        assert_eq!(before.len(), 1);

        writeln!(file, "B,2024-01-02").unwrap();
        file.flush().unwrap();
        assert_eq!(store.reload().unwrap(), 2);

        // earlier readers keep their snapshot
        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Country,Date\nA,2024-01-01\n").unwrap();

        let store = DatasetStore::open(&path, LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(store.reload(), Err(Error::NotFound(_))));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_in_memory_store_cannot_reload() {
        let store = DatasetStore::from_dataset(Dataset::default());
        assert!(store.path().is_none());
        assert!(matches!(store.reload(), Err(Error::Storage(_))));
    }
}

//! Session memoization of the loaded table.
//!
//! Every render cycle asks the cache for the table; only the first request for
//! a path touches the file system. Tables are shared as `Arc<SalesTable>` and
//! never mutated, so handing out clones is safe.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::SalesTable;
use crate::reader::load_sales_table;

/// Tables loaded during this session, keyed by canonical path
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: Mutex<FxHashMap<PathBuf, Arc<SalesTable>>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first use
    ///
    /// The key is the path only; the config is read on the first load.
    /// Failed loads are not cached.
    pub fn get_or_load(&self, path: &Path, config: &DashboardConfig) -> Result<Arc<SalesTable>> {
        let key = cache_key(path);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(table) = entries.get(&key) {
            log::debug!("Using cached sales table for {}", key.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_sales_table(path, config)?);
        self.loads.fetch_add(1, Ordering::Relaxed);
        entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Number of times a file was actually read
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of cached tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached table; the next request reloads from disk
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn cache_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    // The file may be gone; resolve the directory so the key stays stable
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map_or_else(|_| path.to_path_buf(), |dir| dir.join(name)),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test::{temp_path, write_small_csv};

    #[test]
    fn second_request_does_not_reload() {
        let path = temp_path("cache.csv");
        write_small_csv(&path).unwrap();
        let cache = DatasetCache::new();
        let config = DashboardConfig::default();

        let first = cache.get_or_load(&path, &config).unwrap();
        // Removing the file proves the second call is served from memory
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path, &config).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let path = temp_path("cache_missing.csv");
        let cache = DatasetCache::new();
        let config = DashboardConfig::default();

        assert!(cache.get_or_load(&path, &config).is_err());
        assert!(cache.is_empty());

        write_small_csv(&path).unwrap();
        assert_eq!(cache.get_or_load(&path, &config).unwrap().num_rows(), 4);
        assert_eq!(cache.load_count(), 1);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn clear_forces_reload() {
        let path = temp_path("cache_clear.csv");
        write_small_csv(&path).unwrap();
        let cache = DatasetCache::new();
        let config = DashboardConfig::default();

        cache.get_or_load(&path, &config).unwrap();
        cache.clear();
        cache.get_or_load(&path, &config).unwrap();
        assert_eq!(cache.load_count(), 2);
        std::fs::remove_file(&path).ok();
    }
}

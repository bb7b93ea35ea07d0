//! File-backed storage: the whole key-value map in one TOML file.
//!
//! Writes are atomic (temp file + fsync + rename) and guarded by an
//! exclusive file lock, so a crash mid-save leaves the previous store intact
//! and two processes cannot interleave a rename.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use tracing::debug;

use menuet_core::error::{MenuetError, Result};
use menuet_core::storage::Storage;

use crate::paths::MenuetPaths;

/// Durable [`Storage`] backend keeping the flat string map in a single TOML
/// table on disk.
///
/// The map is read once on open and held in memory; every mutation writes
/// the whole file back. Collection sizes are tens of entries, so whole-file
/// rewrites are the simple and sufficient choice.
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens (or initializes) the store file at `path`.
    ///
    /// A missing or empty file yields an empty store; the file itself is
    /// only created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                toml::from_str(&content)
                    .map_err(|e| MenuetError::serialization("TOML", e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "opened store file");
        Ok(Self { path, entries })
    }

    /// Opens the store at the default platform location
    /// (`~/.config/menuet/store.toml` or equivalent).
    pub fn open_default() -> Result<Self> {
        let path = MenuetPaths::store_file().map_err(|e| MenuetError::storage(e.to_string()))?;
        Self::open(path)
    }

    /// The file this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the whole map back to disk atomically.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let serialized = toml::to_string_pretty(&self.entries)
            .map_err(|e| MenuetError::serialization("TOML", e.to_string()))?;

        // Temp file in the same directory, then an atomic rename.
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(serialized.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| MenuetError::storage("store path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| MenuetError::storage("store path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Ok(());
        }
        self.save()
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock next to `path`.
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| MenuetError::storage(format!("failed to acquire lock: {e}")))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; removing the lock file is
        // best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp_dir.path().join("store.toml")).unwrap();

        storage.set("available-menu", "Soup|4.5").unwrap();
        assert_eq!(storage.get("available-menu"), Some("Soup|4.5".to_string()));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");

        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set("tip-config", "15~5~f").unwrap();
            storage.set("saved-menu:usual place", "Soup|4.5~Bread|2").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("tip-config"), Some("15~5~f".to_string()));
        assert_eq!(
            storage.get("saved-menu:usual place"),
            Some("Soup|4.5~Bread|2".to_string())
        );
    }

    #[test]
    fn test_remove_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");

        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set("orders", "Soup|4.5|2").unwrap();
            storage.remove("orders").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("orders"), None);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("nothing.toml")).unwrap();
        assert_eq!(storage.get("available-menu"), None);
    }

    #[test]
    fn test_empty_values_round_trip() {
        // Clearing orders persists an empty string, which must still be a
        // present key after reopen.
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");

        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set("orders", "").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("orders"), Some(String::new()));
    }

    #[test]
    fn test_session_survives_reopen_through_the_store() {
        use menuet_core::reconcile::{OverwriteGate, resolve_startup};
        use menuet_core::store::MenuetStore;

        struct Decline;
        impl OverwriteGate for Decline {
            fn confirm_discard_session(&self) -> bool {
                false
            }
        }

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");

        {
            let mut store = MenuetStore::new(FileStorage::open(&path).unwrap());
            store.add_available_item("Soup", 4.5).unwrap();
            store.add_available_item("Bread", 2.0).unwrap();
            store.increment_order_line("Soup", 4.5).unwrap();
            store.set_tip(15.0).unwrap();
        }

        let mut store = MenuetStore::new(FileStorage::open(&path).unwrap());
        resolve_startup(&mut store, None, &Decline).unwrap();

        assert_eq!(store.available().len(), 2);
        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.orders()[0].amount, 1);
        assert_eq!(store.tip_config().tip, 15.0);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");
        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".store.toml.tmp").exists());
    }
}

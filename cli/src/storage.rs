use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use client::{KeyValueStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::warn;

const SESSION_DIR: &str = ".library-client";
const SESSION_FILE: &str = "session.json";

/// Session entries kept as one JSON object in a file, rewritten on every
/// change.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_home_dir() -> anyhow::Result<Self> {
        let home = home::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot resolve the home directory"))?;
        Ok(Self::new(home.join(SESSION_DIR).join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes through a temporary file in the same directory, created with
    /// owner-only permissions, then renamed over the session file.
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(serde_json::to_string_pretty(entries)?.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|error| error.error)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "Fail to read session file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // a corrupt file is overwritten
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load().unwrap_or_default();
        entries.remove(key);
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_storage() -> anyhow::Result<(TempDir, FileStorage)> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join(SESSION_DIR).join(SESSION_FILE));
        Ok((dir, storage))
    }

    #[test]
    fn test_entries_survive_a_new_instance() -> anyhow::Result<()> {
        let (_dir, storage) = temp_storage()?;
        assert_eq!(storage.get("access_token"), None);

        storage.set("access_token", "abc")?;
        storage.set("user", r#"{"id":1}"#)?;

        let reopened = FileStorage::new(storage.path().to_path_buf());
        assert_eq!(reopened.get("access_token").as_deref(), Some("abc"));
        assert_eq!(reopened.get("user").as_deref(), Some(r#"{"id":1}"#));
        Ok(())
    }

    #[test]
    fn test_removing_last_entry_deletes_the_file() -> anyhow::Result<()> {
        let (_dir, storage) = temp_storage()?;
        storage.set("access_token", "abc")?;
        assert!(storage.path().exists());

        storage.remove("access_token")?;
        storage.remove("access_token")?;

        assert!(!storage.path().exists());
        assert_eq!(storage.get("access_token"), None);
        Ok(())
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_and_is_replaced() -> anyhow::Result<()> {
        let (dir, storage) = temp_storage()?;
        fs::create_dir_all(dir.path().join(SESSION_DIR))?;
        fs::write(storage.path(), "not json")?;

        assert_eq!(storage.get("access_token"), None);
        storage.set("access_token", "abc")?;
        assert_eq!(storage.get("access_token").as_deref(), Some("abc"));
        Ok(())
    }

    #[test]
    fn test_rewrite_leaves_no_temporary_files() -> anyhow::Result<()> {
        let (dir, storage) = temp_storage()?;
        storage.set("access_token", "abc")?;
        storage.set("user", r#"{"id":1}"#)?;
        storage.set("access_token", "def")?;

        let names: Vec<_> = fs::read_dir(dir.path().join(SESSION_DIR))?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, vec![std::ffi::OsString::from(SESSION_FILE)]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_readable_by_owner_only() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, storage) = temp_storage()?;
        storage.set("access_token", "secret")?;

        let mode = fs::metadata(storage.path())?.permissions().mode();
        assert_eq!(mode & 0o077, 0, "session file mode = {:o}", mode & 0o777);
        Ok(())
    }
}

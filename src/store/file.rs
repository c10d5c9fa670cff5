use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::StateStore;
use crate::error::{AuditError, AuditResult};

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> AuditResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(AuditError::Validation(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> AuditResult<Option<String>> {
        match fs::read_to_string(self.path(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AuditResult<()> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;
        // write-then-rename so a crash never leaves a half-written document
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        trace!(key, bytes = value.len(), "persisted");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AuditResult<()> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("energy-audit-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_set_get_remove() {
        let dir = scratch_dir();
        let mut store = FileStore::new(&dir);

        assert_eq!(store.get("nceec_rooms").unwrap(), None);
        store.set("nceec_rooms", "[]").unwrap();
        assert_eq!(store.get("nceec_rooms").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("nceec_rooms.json").exists());

        store.remove("nceec_rooms").unwrap();
        assert_eq!(store.get("nceec_rooms").unwrap(), None);
        store.remove("nceec_rooms").unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let mut store = FileStore::new(scratch_dir());
        assert!(matches!(store.set("../escape", "x"), Err(AuditError::Validation(_))));
        assert!(store.get("").is_err());
        assert!(store.get(".hidden").is_err());
    }
}

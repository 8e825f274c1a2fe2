//! Persistent value stores.
//!
//! A store keeps one flat JSON object per panel id. The panel never
//! talks to the filesystem directly; everything goes through the
//! [`Store`] trait so tests and ephemeral panels can swap in
//! [`MemStore`].

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::SystemTime,
};

use log::{debug, warn};
use serde_json::Value as Json;

use crate::error::{PanelError, Result};

/// Flat string-keyed value map, the persisted form of a panel.
pub type ValueMap = serde_json::Map<String, Json>;

/// Persistence backend for panel values.
pub trait Store: Send + Sync {
    /// Load the value map for a panel id, `None` when nothing is stored.
    fn load(&self, id: &str) -> Result<Option<ValueMap>>;

    /// Persist the value map for a panel id.
    fn save(&self, id: &str, values: &ValueMap) -> Result<()>;

    /// Drop everything stored for a panel id.
    fn remove(&self, id: &str) -> Result<()>;
}

/// File-backed store: one JSON or TOML file per panel.
///
/// The format follows the file extension (`json`, `toml`/`tml`); other
/// extensions are rejected. The previous file is copied to a
/// timestamped backup before each save unless backups are disabled.
/// The panel id selects nothing here since the path already does; it
/// only shows up in log messages.
pub struct FileStore {
    path: PathBuf,
    backup: bool,
}

impl FileStore {
    /// Store backed by the given file, with backups enabled.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
            backup: true,
        }
    }

    /// Enable or disable the backup copy before each save.
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Result<String> {
        let ext = self
            .path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        match ext {
            "json" | "toml" | "tml" => Ok(ext.to_string()),
            other => Err(PanelError::UnsupportedFormat(other.to_string())),
        }
    }

    fn parse(&self, content: &str) -> Result<ValueMap> {
        let json: Json = match self.extension()?.as_str() {
            "json" => serde_json::from_str(content)?,
            _ => {
                let v: toml::Value = toml::from_str(content)?;
                serde_json::to_value(v)?
            }
        };
        match json {
            Json::Object(map) => Ok(map),
            other => Err(PanelError::Schema {
                path: self.path.display().to_string(),
                reason: format!("expected a table at the top level, got {other}"),
            }),
        }
    }

    fn render(&self, values: &ValueMap) -> Result<String> {
        let json = Json::Object(values.clone());
        match self.extension()?.as_str() {
            "json" => Ok(serde_json::to_string_pretty(&json)?),
            _ => Ok(toml::to_string_pretty(&json)?),
        }
    }

    fn backup_existing(&self) -> Result<()> {
        if !self.backup || !self.path.exists() {
            return Ok(());
        }
        let ext = self.extension()?;
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let backup_path = self.path.with_extension(format!("bk-{secs}.{ext}"));
        fs::copy(&self.path, &backup_path)?;
        debug!("backed up {} to {}", self.path.display(), backup_path.display());
        Ok(())
    }
}

impl Store for FileStore {
    fn load(&self, id: &str) -> Result<Option<ValueMap>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let map = self.parse(&content)?;
        debug!(
            "loaded {} values for panel `{id}` from {}",
            map.len(),
            self.path.display()
        );
        Ok(Some(map))
    }

    fn save(&self, id: &str, values: &ValueMap) -> Result<()> {
        let content = self.render(values)?;
        self.backup_existing()?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        debug!("saved panel `{id}` to {}", self.path.display());
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!("removed stored values for panel `{id}`");
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral panels.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<HashMap<String, ValueMap>>,
}

impl MemStore {
    /// Empty store.
    pub fn new() -> Self {
        MemStore::default()
    }
}

impl Store for MemStore {
    fn load(&self, id: &str) -> Result<Option<ValueMap>> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn save(&self, id: &str, values: &ValueMap) -> Result<()> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        guard.insert(id.to_string(), values.clone());
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<()> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if guard.remove(id).is_none() {
            warn!("nothing stored for panel `{id}`");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValueMap {
        serde_json::json!({ "name": "zr", "jobs": 8, "verbose": true })
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn mem_store_round_trip() {
        let store = MemStore::new();
        assert!(store.load("app").unwrap().is_none());
        store.save("app", &sample()).unwrap();
        assert_eq!(store.load("app").unwrap().unwrap(), sample());
        store.remove("app").unwrap();
        assert!(store.load("app").unwrap().is_none());
    }

    #[test]
    fn file_store_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("app.json"));
        assert!(store.load("app").unwrap().is_none());
        store.save("app", &sample()).unwrap();
        assert_eq!(store.load("app").unwrap().unwrap(), sample());
    }

    #[test]
    fn file_store_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("app.toml"));
        store.save("app", &sample()).unwrap();
        let map = store.load("app").unwrap().unwrap();
        assert_eq!(map["name"], serde_json::json!("zr"));
        assert_eq!(map["jobs"], serde_json::json!(8));
        assert_eq!(map["verbose"], serde_json::json!(true));
    }

    #[test]
    fn file_store_backs_up_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("app.json"));
        store.save("app", &sample()).unwrap();
        store.save("app", &sample()).unwrap();

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_string_lossy()
                    .contains(".bk-")
            })
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn file_store_backup_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("app.json")).with_backup(false);
        store.save("app", &sample()).unwrap();
        store.save("app", &sample()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let store = FileStore::new("values.yaml");
        let err = store.save("app", &sample());
        assert!(matches!(err, Err(PanelError::UnsupportedFormat(_))));
    }

    #[test]
    fn empty_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "  \n").unwrap();
        let store = FileStore::new(&path);
        assert!(store.load("app").unwrap().is_none());
    }
}

use crate::errors::{Result, SheetLinkError};
use crate::host::PropertyStore;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// [`PropertyStore`] persisted as one JSON object in a file. The whole map is
/// rewritten on every mutation; per-user scoping comes from the file path.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(SheetLinkError::host)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents).map_err(SheetLinkError::host)
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(SheetLinkError::host)?;
        }
        let serialized = serde_json::to_string_pretty(map).map_err(SheetLinkError::host)?;
        fs::write(&self.path, serialized).map_err(SheetLinkError::host)
    }
}

impl PropertyStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        let map = self.load()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

use dailymenu_menu::{StateStore, StoreError};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// File-backed state store.
///
/// Everything lives in one JSON object file; each key holds one serialized
/// blob as a string. Reads and writes cover the whole file, so concurrent
/// processes resolve last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, map: Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.read_all()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // An unreadable file is overwritten rather than kept broken.
        let mut map = match self.read_all() {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "state file unreadable, rewriting it");
                Map::new()
            }
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(map)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_all().unwrap_or_default();
        // A corrupt file simply gets rewritten without the key.
        if map.remove(key).is_some() || self.path.exists() {
            self.write_all(map)?;
        }
        Ok(())
    }
}

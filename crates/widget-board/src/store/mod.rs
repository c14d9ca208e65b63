//! Key-value store for persisted UI state
//!
//! The board and the console preferences read and write string values under
//! fixed keys through [`SettingsStore`]. Two backends are provided:
//!
//! - [`MemoryStore`]: in-process map, for tests and throwaway sessions.
//! - [`FileStore`]: a JSON object file, `{"key": "value", ...}`, replaced
//!   atomically on every write.

use crate::error::{Result, StoreError};
use chrono::Local;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key-value storage.
pub trait SettingsStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `key = value`.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object file.
///
/// The file is read on every call, so external edits are picked up. A
/// missing file reads as empty; the parent directory is created on the first
/// write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole object.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read.
    /// Returns `StoreError::Parse` if it is not a JSON object.
    fn read_object(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Io(e).into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Parse {
                path: self.path.clone(),
                message: format!("expected a JSON object, found {}", json_type(&other)),
            }
            .into()),
            Err(e) => Err(StoreError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Writes the object with temp-file-then-rename.
    ///
    /// 1. Write to a temp file with a timestamp suffix
    /// 2. Fsync it
    /// 3. Rename over the original
    ///
    /// On failure before the rename the temp file is left as a safety copy.
    fn write_object_atomic(&self, map: Map<String, Value>) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage.json".to_string());
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let temp_path = self
            .path
            .with_file_name(format!("{file_name}.tmp.{timestamp}"));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::Io)?;
            }
        }

        let json = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        fs::write(&temp_path, json).map_err(StoreError::Io)?;

        let file = fs::File::open(&temp_path).map_err(StoreError::Io)?;
        file.sync_all().map_err(StoreError::Io)?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            log::error!("rename {} failed: {e}", temp_path.display());
            StoreError::WriteAtomic {
                path: self.path.clone(),
                temp_path: temp_path.clone(),
            }
        })?;

        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_object()?;
        Ok(map.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_object()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_object_atomic(map)?;
        log::debug!("stored {key} in {}", self.path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_object()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_object_atomic(map)?;
        log::debug!("removed {key} from {}", self.path.display());
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Chunk: docs/chunks/settings_store - Persistent key-value settings
//!
//! String key-value storage for settings.
//!
//! Storage is best effort: a store that cannot be read behaves as empty and a
//! failed write is logged and otherwise ignored by callers.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Settings file name inside the data directory.
const SETTINGS_FILENAME: &str = "settings.json";

/// A string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Writes `value` under `key`, logging (and otherwise ignoring) failures.
pub fn set_or_warn<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key, error = %e, "failed to persist setting");
    }
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A store persisted as a JSON object in a single file.
///
/// The whole file is rewritten on every `set`, via a temp file and rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = read_values(&path).unwrap_or_default();
        Self { path, values }
    }

    /// Opens `settings.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::open(dir.join(SETTINGS_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.write()
    }
}

fn read_values(path: &Path) -> Option<BTreeMap<String, String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read settings");
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(values) => Some(values),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "discarding malformed settings");
            None
        }
    }
}

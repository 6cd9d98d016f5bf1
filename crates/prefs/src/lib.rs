//! # prefs
//!
//! Key-value preference store backed by a single JSON file. The file is
//! read once when the store is opened and rewritten whole on every write,
//! so reads and writes are synchronous from the caller's side.
//!
//! Persistence failure is not an error the caller ever sees: an unreadable
//! or unwritable file degrades to the supplied defaults with a warning in
//! the log, and the in-memory value still serves the current session.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub struct PrefStore {
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl PrefStore {
    /// Open a store backed by `path`. Missing, unreadable, or unparseable
    /// files all yield an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load(&path);
        Self {
            path: Some(path),
            values,
        }
    }

    /// Open the per-user store for `namespace`, at
    /// `<user config dir>/<namespace>/prefs.json`. Hosts without a config
    /// dir get an in-memory store.
    pub fn open_default(namespace: &str) -> Self {
        match dirs::config_dir() {
            Some(base) => Self::open(base.join(namespace).join("prefs.json")),
            None => {
                log::warn!(target: "prefs", "no user config dir; preferences will not persist");
                Self::in_memory()
            }
        }
    }

    /// A store with no backing file. Values last for this session only.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Map::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Store a value and best-effort persist the whole file. The in-memory
    /// value is updated first, so a failed write never loses the session.
    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        self.persist();
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, Value::Bool(value));
    }

    fn persist(&self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            log::warn!(target: "prefs", "cannot create {}: {err}", parent.display());
            return;
        }
        let content = match serde_json::to_string_pretty(&Value::Object(self.values.clone())) {
            Ok(content) => content,
            Err(err) => {
                log::warn!(target: "prefs", "cannot serialize preferences: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(path, content) {
            log::warn!(target: "prefs", "cannot write {}: {err}", path.display());
        }
    }
}

fn load(path: &Path) -> Map<String, Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!(target: "prefs", "cannot read {}: {err}", path.display());
            }
            return Map::new();
        }
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log::warn!(target: "prefs", "{} is not a JSON object; starting empty", path.display());
            Map::new()
        }
        Err(err) => {
            log::warn!(target: "prefs", "cannot parse {}: {err}; starting empty", path.display());
            Map::new()
        }
    }
}

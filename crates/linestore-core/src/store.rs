//! The store: a typed key-value mapping bound to a line-oriented text file
//!
//! ## Lifecycle
//!
//! A store is either bound to a backing file and valid, or unbound. Binding
//! (`Store::open` / `bind`) reads the file, creating it empty first when it
//! does not exist, and captures a snapshot of the loaded content. `close`
//! drops the path and all content.
//!
//! ## Snapshot semantics
//!
//! The snapshot is captured only by a successful load. `save` never touches
//! it: change queries always compare against the last *loaded* state, so
//! repeated saves without a reload keep reporting the same change set.
//!
//! ## Ownership
//!
//! A `Store` is a single-owner, fully synchronous object. It takes no file
//! lock and no in-process lock; two stores writing the same path race with
//! last-writer-wins outcome. Callers needing cross-thread access must add
//! their own synchronization.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value as Json;
use tracing::debug;

use crate::codec;
use crate::diff;
use crate::error::{StoreError, StoreResult};
use crate::value::Value;

/// The in-memory mapping type: keys to typed values, insertion-ordered.
pub type EntryMap = IndexMap<String, Value>;

/// A typed key-value store backed by a line-oriented text file.
#[derive(Debug, Default)]
pub struct Store {
    /// Backing file; `None` means unbound.
    path: Option<PathBuf>,
    /// Current content.
    live: EntryMap,
    /// Content as of the last successful load.
    snapshot: EntryMap,
    /// Write entries in ascending key order on save.
    sort_on_write: bool,
    /// Whether the backing file was successfully read since the last
    /// bind/close.
    valid: bool,
}

impl Store {
    /// Create an unbound store. Every persistence operation fails until
    /// [`bind`](Store::bind) succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the store at `path`, creating the file empty (with parent
    /// directories) when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let mut store = Self::new();
        store.bind(path)?;
        Ok(store)
    }

    /// Bind this store to `path` and load it, discarding any previous
    /// binding and content first.
    pub fn bind(&mut self, path: impl Into<PathBuf>) -> StoreResult<()> {
        self.close();
        self.path = Some(path.into());
        self.load()
    }

    /// Reset to the unbound state: no path, no content, not valid.
    pub fn close(&mut self) {
        self.path = None;
        self.live.clear();
        self.snapshot.clear();
        self.valid = false;
    }

    /// (Re)load the backing file.
    ///
    /// Creates the file empty when absent. Decodes every line; for
    /// duplicate keys the last occurrence wins. On success both the live
    /// mapping and the snapshot hold the file content and the store is
    /// valid; on failure the store is left invalid.
    pub fn load(&mut self) -> StoreResult<()> {
        self.valid = false;
        let path = match &self.path {
            Some(path) => path.clone(),
            None => return Err(StoreError::NotLoaded),
        };

        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| StoreError::io(e, parent))?;
                }
            }
            fs::write(&path, "").map_err(|e| StoreError::io(e, &path))?;
        }

        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(e, &path))?;
        let mut live = EntryMap::new();
        for line in text.split('\n') {
            if let Some((key, value)) = codec::decode(line) {
                live.insert(key, value);
            }
        }
        debug!(entries = live.len(), path = %path.display(), "store loaded");

        self.snapshot = live.clone();
        self.live = live;
        self.valid = true;
        Ok(())
    }

    /// Whether the store is bound to a readable backing file.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The backing file path, when bound.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether saves write entries in ascending key order.
    pub fn sort_on_write(&self) -> bool {
        self.sort_on_write
    }

    pub fn set_sort_on_write(&mut self, sort: bool) {
        self.sort_on_write = sort;
    }

    // ==================== Queries ====================

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.live.get(key)
    }

    /// Look up a value by key, falling back to `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.live.get(key).cloned().unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.live.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.live.iter()
    }

    /// The live mapping.
    pub fn entries(&self) -> &EntryMap {
        &self.live
    }

    /// All keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.live.keys()
    }

    /// Keys containing `needle`.
    pub fn search(&self, needle: &str) -> Vec<String> {
        self.keys().filter(|k| k.contains(needle)).cloned().collect()
    }

    /// Keys starting with `needle`.
    pub fn search_prefix(&self, needle: &str) -> Vec<String> {
        self.keys()
            .filter(|k| k.starts_with(needle))
            .cloned()
            .collect()
    }

    /// Keys ending with `needle`.
    pub fn search_suffix(&self, needle: &str) -> Vec<String> {
        self.keys().filter(|k| k.ends_with(needle)).cloned().collect()
    }

    /// A new mapping holding only the given keys (those that exist), in
    /// store order.
    pub fn only<I, S>(&self, keys: I) -> EntryMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        self.live
            .iter()
            .filter(|(k, _)| wanted.iter().any(|w| w == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// A new mapping holding everything but the given keys, in store order.
    pub fn all_except<I, S>(&self, keys: I) -> EntryMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        self.live
            .iter()
            .filter(|(k, _)| !excluded.iter().any(|w| w == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // ==================== Mutation ====================

    /// Set `key` to `value`.
    ///
    /// A String equal to `true` or `false` (case-insensitive) is coerced
    /// into the matching Boolean before storing; all other values are
    /// stored as-is.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = match value.into() {
            Value::String(s) if s.eq_ignore_ascii_case("true") => Value::Boolean(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Value::Boolean(false),
            other => other,
        };
        self.live.insert(key.into(), value);
    }

    /// Remove `key` if present. Absent keys are a silent no-op.
    pub fn unset(&mut self, key: &str) {
        self.live.shift_remove(key);
    }

    /// Remove every key in `keys` that is present.
    pub fn unset_many<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.unset(key.as_ref());
        }
    }

    /// Move the value under `from` to `to`, equivalent to
    /// `set(to, get(from))` followed by `unset(from)`. When `from == to`
    /// this degenerates to a no-op overwrite.
    pub fn rename(&mut self, from: &str, to: &str) {
        let value = self.get_or(from, Value::Null);
        self.set(to, value);
        if from != to {
            self.unset(from);
        }
    }

    /// Set every key in `keys` that currently exists to `value`. Keys not
    /// present are left absent, not created.
    pub fn reset<I, S>(&mut self, keys: I, value: Value)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if self.live.contains_key(key) {
                self.set(key, value.clone());
            }
        }
    }

    /// Replace the entire live mapping.
    pub fn set_all(&mut self, entries: EntryMap) {
        self.live = entries;
    }

    /// Merge `entries` into the live mapping via [`set`](Store::set).
    pub fn update<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    // ==================== Persistence ====================

    /// Write all live entries back to the backing file, CRLF-terminated,
    /// in ascending key order when `sort_on_write` is set.
    ///
    /// Best-effort overwrite: a read-only file is forced writable, then
    /// the file is deleted and recreated. This is deliberately not
    /// transactional; a crash mid-write can leave a truncated or missing
    /// file. The snapshot is not updated.
    pub fn save(&self) -> StoreResult<()> {
        if !self.valid {
            return Err(StoreError::NotLoaded);
        }
        let path = match &self.path {
            Some(path) => path,
            None => return Err(StoreError::NotLoaded),
        };

        if path.exists() {
            if let Ok(meta) = fs::metadata(path) {
                let mut perms = meta.permissions();
                if perms.readonly() {
                    perms.set_readonly(false);
                    let _ = fs::set_permissions(path, perms);
                }
            }
            let _ = fs::remove_file(path);
        }

        let mut entries: Vec<(&String, &Value)> = self.live.iter().collect();
        if self.sort_on_write {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut out = String::new();
        for (key, value) in entries {
            out.push_str(&codec::encode(key, value));
            out.push_str("\r\n");
        }
        fs::write(path, out).map_err(|e| StoreError::io(e, path))?;
        debug!(entries = self.live.len(), path = %path.display(), "store saved");
        Ok(())
    }

    // ==================== JSON export/import ====================

    /// Export the live mapping as a pretty-printed JSON object.
    pub fn to_json(&self) -> String {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.live {
            map.insert(key.clone(), value.to_json());
        }
        // Serializing a Json value to a String cannot fail
        serde_json::to_string_pretty(&Json::Object(map)).unwrap_or_default()
    }

    /// Import a JSON object into the store.
    ///
    /// With `merge` the members are set on top of the existing mapping,
    /// otherwise they replace it. With `save` the store is persisted
    /// immediately after. A non-object root fails without mutating.
    pub fn from_json(&mut self, text: &str, merge: bool, save: bool) -> StoreResult<()> {
        let parsed: Json = serde_json::from_str(text)?;
        let map = match parsed {
            Json::Object(map) => map,
            other => {
                return Err(StoreError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };
        if !merge {
            self.live.clear();
        }
        for (key, value) in map {
            self.set(key, Value::from_json(value));
        }
        if save {
            self.save()?;
        }
        Ok(())
    }

    // ==================== Change tracking ====================

    /// Whether the live mapping differs from the load-time snapshot
    /// (order-independent, deep equality).
    pub fn is_changed(&self) -> bool {
        diff::is_changed(&self.live, &self.snapshot)
    }

    /// Whether the value under `key` differs between live and snapshot.
    ///
    /// Returns false when either side is absent or the two kinds differ;
    /// see [`diff::is_value_changed`] for the rationale.
    pub fn is_value_changed(&self, key: &str) -> bool {
        diff::is_value_changed(&self.live, &self.snapshot, key)
    }
}

fn json_type_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

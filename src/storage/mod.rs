//! Storage layer for Tickbox data.
//!
//! The [`Store`] is the single in-memory list for a session. Persistence is a
//! flat JSON file: an array of item records, pretty-printed with a four-space
//! indent. Saves go through a temporary file in the target directory and are
//! renamed into place, so an interrupted save never clobbers a good file.

use crate::models::Item;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

const JSON_INDENT: &[u8] = b"    ";

/// Held for the whole temp-file-then-rename sequence of a save.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Block until no save is in flight, then keep new saves from starting.
///
/// The interrupt handler holds this before exiting so a save is never cut
/// off between creating its temporary file and renaming it.
pub fn hold_writes() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The ordered collection of items for one session.
///
/// Positions are not identifiers: they are recomputed for every listing, and
/// a position shown in a filtered view only means something in that view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Store {
    items: Vec<Item>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Positions (in the full list) of items whose `done` flag equals `done`.
    pub fn positions_where_done(&self, done: bool) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_done() == done)
            .map(|(index, _)| index)
            .collect()
    }

    /// Read items from `path`.
    ///
    /// No path configured, a missing file and a blank file all yield nothing.
    /// Any bad record fails the whole load.
    pub fn load(path: Option<&Path>) -> Result<Vec<Item>> {
        let Some(path) = path else {
            return Ok(Vec::new());
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "storage file missing, nothing to load");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::File {
                    op: "read",
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&text).map_err(|source| Error::MalformedFile {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Array(records) = value else {
            return Err(Error::InvalidInput(format!(
                "{} must hold a JSON array of records",
                path.display()
            )));
        };

        let items = records
            .iter()
            .map(Item::from_record)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(path = %path.display(), count = items.len(), "loaded items");
        Ok(items)
    }

    /// Load `path` and append its items after the current ones.
    ///
    /// Returns how many items were added. On error the store is unchanged.
    pub fn open(&mut self, path: Option<&Path>) -> Result<usize> {
        let loaded = Self::load(path)?;
        let count = loaded.len();
        self.items.extend(loaded);
        Ok(count)
    }

    /// Write every item to `path`, replacing the file atomically.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = path.ok_or(Error::NoStorageConfigured)?;
        let contents = encode(&self.items)?;

        let _writes = hold_writes();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|source| Error::File {
            op: "create a temporary file in",
            path: dir.to_path_buf(),
            source,
        })?;
        temp.write_all(&contents)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|source| Error::File {
                op: "write",
                path: temp.path().to_path_buf(),
                source,
            })?;
        temp.persist(path).map_err(|e| Error::File {
            op: "replace",
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::debug!(path = %path.display(), count = self.items.len(), "saved items");
        Ok(())
    }
}

/// Render items as the pretty-printed file body.
fn encode(items: &[Item]) -> Result<Vec<u8>> {
    let records: Vec<Value> = items.iter().map(Item::to_record).collect();
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    records.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

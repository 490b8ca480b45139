//! Persistent order storage
//!
//! The store is a capability object handed to the engine at construction:
//! two named ordered lists of item keys plus the boolean "reorder" signal
//! observers watch for changes. `FileStore` keeps the whole document in a
//! JSON file under the user config dir; `MemoryStore` backs tests and
//! ephemeral runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::rows::Slot;

/// Storage port for the reorder engine.
///
/// `load` never fails: missing or unreadable storage yields an empty
/// sequence. `save` must be atomic with respect to readers.
pub trait OrderStore {
    fn load(&self, slot: Slot) -> Vec<String>;
    fn save(&mut self, slot: Slot, keys: &[String]) -> Result<()>;
    /// Flip the change-notification flag. The value carries no meaning;
    /// observers react to the edge.
    fn toggle_reorder_signal(&mut self) -> Result<()>;
    fn reorder_signal(&self) -> bool;
}

/// On-disk document: both slot orders plus the notification flag.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoredOrders {
    #[serde(rename = "primary-order", default)]
    pub primary_order: Vec<String>,
    #[serde(rename = "secondary-order", default)]
    pub secondary_order: Vec<String>,
    #[serde(default)]
    pub reorder: bool,
}

impl StoredOrders {
    fn order(&self, slot: Slot) -> &Vec<String> {
        match slot {
            Slot::Primary => &self.primary_order,
            Slot::Secondary => &self.secondary_order,
        }
    }

    fn order_mut(&mut self, slot: Slot) -> &mut Vec<String> {
        match slot {
            Slot::Primary => &mut self.primary_order,
            Slot::Secondary => &mut self.secondary_order,
        }
    }
}

/// JSON-file-backed store.
///
/// Every mutation rewrites the full document through a temp file and
/// rename, so a reader never observes a partial list and both slots plus
/// the flag always land on disk together.
pub struct FileStore {
    path: PathBuf,
    doc: StoredOrders,
}

impl FileStore {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Open the store at `path`, reading whatever document exists there.
    /// A missing or corrupt file starts the store empty.
    pub fn open(path: PathBuf) -> Self {
        let doc = Self::read_document(&path);
        Self { path, doc }
    }

    fn read_document(path: &Path) -> StoredOrders {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse order file, starting empty");
                    StoredOrders::default()
                }
            },
            Err(_) => StoredOrders::default(),
        }
    }

    fn write_document(&mut self, next: StoredOrders) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&next)
            .context("Failed to serialize order document")?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, contents)
            .context(format!("Failed to write order file to {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .context(format!("Failed to move order file into place at {}", self.path.display()))?;
        // Only adopt the new document once it is durably on disk
        self.doc = next;
        Ok(())
    }
}

impl OrderStore for FileStore {
    fn load(&self, slot: Slot) -> Vec<String> {
        self.doc.order(slot).clone()
    }

    fn save(&mut self, slot: Slot, keys: &[String]) -> Result<()> {
        let mut next = self.doc.clone();
        *next.order_mut(slot) = keys.to_vec();
        self.write_document(next)?;
        info!(key = slot.storage_key(), count = keys.len(), "Saved order");
        Ok(())
    }

    fn toggle_reorder_signal(&mut self) -> Result<()> {
        let mut next = self.doc.clone();
        next.reorder = !next.reorder;
        self.write_document(next)
    }

    fn reorder_signal(&self) -> bool {
        self.doc.reorder
    }
}

/// In-memory store for tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: StoredOrders,
    toggles: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the reorder signal has flipped.
    pub fn toggle_count(&self) -> usize {
        self.toggles
    }
}

impl OrderStore for MemoryStore {
    fn load(&self, slot: Slot) -> Vec<String> {
        self.doc.order(slot).clone()
    }

    fn save(&mut self, slot: Slot, keys: &[String]) -> Result<()> {
        *self.doc.order_mut(slot) = keys.to_vec();
        Ok(())
    }

    fn toggle_reorder_signal(&mut self) -> Result<()> {
        self.doc.reorder = !self.doc.reorder;
        self.toggles += 1;
        Ok(())
    }

    fn reorder_signal(&self) -> bool {
        self.doc.reorder
    }
}

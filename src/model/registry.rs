//! Edit-column registry
//!
//! Maps each [`ColumnId`] to the handler and editor metadata of one edit
//! column, and keeps the path and key indexes used to find a column from the
//! surface's point of view.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::column::{EditColumn, EditHandler, EditorConfig};
use crate::error::GridError;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque identifier of an edit column
///
/// Unique within one grid and never reused, even after the column is removed.
/// Only identity comparison is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(u64);

impl ColumnId {
    /// Surface-side form of the identifier (`col0`, `col1`, ...)
    pub fn internal_id(self) -> String {
        self.to_string()
    }

    pub(crate) fn from_internal_id(internal_id: &str) -> Option<Self> {
        let digits = internal_id.strip_prefix("col")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        digits.parse().ok().map(ColumnId)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col{}", self.0)
    }
}

/// Converts a row item to the text shown in its cell
pub type ValueProvider<T> = Rc<dyn Fn(&T) -> String>;

// ============================================================================
// Entries
// ============================================================================

/// Registry state for a single edit column
pub struct ColumnEntry<T> {
    pub(crate) column: EditColumn,
    pub(crate) handler: EditHandler<T>,
    pub(crate) editor: EditorConfig,
    pub(crate) path: String,
    pub(crate) key: Option<String>,
    pub(crate) value_provider: Option<ValueProvider<T>>,
}

impl<T> ColumnEntry<T> {
    pub fn column(&self) -> EditColumn {
        self.column
    }

    pub fn handler(&self) -> &EditHandler<T> {
        &self.handler
    }

    pub fn editor(&self) -> &EditorConfig {
        &self.editor
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl<T> fmt::Debug for ColumnEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnEntry")
            .field("column", &self.column)
            .field("editor", &self.editor)
            .field("path", &self.path)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// A borrowed entry that can still update the registry's key index
pub(crate) struct EntrySlot<'a, T> {
    pub(crate) entry: &'a mut ColumnEntry<T>,
    keys: &'a mut HashMap<String, ColumnId>,
}

impl<T> EntrySlot<'_, T> {
    pub(crate) fn set_key(&mut self, key: String) -> Result<(), GridError> {
        let id = self.entry.column.id();
        match self.keys.get(&key) {
            Some(&owner) if owner == id => return Ok(()),
            Some(_) => return Err(GridError::DuplicateKey { key }),
            None => {}
        }

        if let Some(previous) = self.entry.key.replace(key.clone()) {
            self.keys.remove(&previous);
        }
        self.keys.insert(key, id);
        Ok(())
    }
}

/// Where a new column's surface path comes from
#[derive(Debug, Clone)]
pub enum ColumnPath {
    /// Use the generated internal id as the path
    Generated,
    /// Bind the column to a named row property
    Property(String),
}

// ============================================================================
// Registry
// ============================================================================

/// Owner of all edit-column entries of one grid
pub struct ColumnRegistry<T> {
    entries: HashMap<ColumnId, ColumnEntry<T>>,
    paths: HashMap<String, ColumnId>,
    keys: HashMap<String, ColumnId>,
    next_column_id: u64,
}

impl<T> Default for ColumnRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            paths: HashMap::new(),
            keys: HashMap::new(),
            next_column_id: 0,
        }
    }
}

impl<T> ColumnRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new column ID
    fn next_column_id(&mut self) -> ColumnId {
        let id = ColumnId(self.next_column_id);
        self.next_column_id += 1;
        id
    }

    /// Allocate an identifier and store a new entry
    ///
    /// Fails without consuming the path if another live column owns it. The
    /// identifier counter still advances, so ids are never handed out twice.
    /// Property paths shaped like a generated id (`col<n>`) are rejected up
    /// front, since a later generated column would claim them.
    pub fn register(
        &mut self,
        handler: EditHandler<T>,
        editor: EditorConfig,
        path: ColumnPath,
        value_provider: Option<ValueProvider<T>>,
    ) -> Result<EditColumn, GridError> {
        if let ColumnPath::Property(name) = &path {
            if ColumnId::from_internal_id(name).is_some() {
                return Err(GridError::ReservedPath { path: name.clone() });
            }
        }
        let id = self.next_column_id();
        let path = match path {
            ColumnPath::Generated => id.internal_id(),
            ColumnPath::Property(name) => name,
        };

        if self.paths.contains_key(&path) {
            return Err(GridError::DuplicatePath { path });
        }

        let column = EditColumn::new(id);
        self.paths.insert(path.clone(), id);
        self.entries.insert(
            id,
            ColumnEntry {
                column,
                handler,
                editor,
                path,
                key: None,
                value_provider,
            },
        );

        tracing::debug!(column = %id, "registered edit column");
        Ok(column)
    }

    /// Remove an entry together with its path and key bindings
    pub fn unregister(&mut self, id: ColumnId) -> Option<ColumnEntry<T>> {
        let entry = self.entries.remove(&id)?;
        self.paths.remove(&entry.path);
        if let Some(key) = &entry.key {
            self.keys.remove(key);
        }
        tracing::debug!(column = %id, path = %entry.path, "unregistered edit column");
        Some(entry)
    }

    pub fn lookup(&self, id: ColumnId) -> Option<&ColumnEntry<T>> {
        self.entries.get(&id)
    }

    /// Column bound to a surface property path
    pub fn lookup_path(&self, path: &str) -> Option<ColumnId> {
        self.paths.get(path).copied()
    }

    pub fn column_by_key(&self, key: &str) -> Option<EditColumn> {
        self.keys.get(key).map(|&id| EditColumn::new(id))
    }

    /// Assign (or replace) the application key of a column
    pub fn set_key(&mut self, id: ColumnId, key: impl Into<String>) -> Result<(), GridError> {
        self.slot(id)
            .ok_or(GridError::ColumnRemoved(id))?
            .set_key(key.into())
    }

    /// Mutable entry together with the key index it participates in
    pub(crate) fn slot(&mut self, id: ColumnId) -> Option<EntrySlot<'_, T>> {
        let entry = self.entries.get_mut(&id)?;
        Some(EntrySlot {
            entry,
            keys: &mut self.keys,
        })
    }

    pub fn contains(&self, id: ColumnId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Snapshot of the live columns
    pub fn columns(&self) -> Vec<EditColumn> {
        self.entries.values().map(|entry| entry.column).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

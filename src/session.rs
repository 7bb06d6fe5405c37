//! Replay session: which edit columns to put on a grid of CSV rows
//!
//! ```yaml
//! columns:
//!   - property: name
//!   - property: role
//!     editor: select
//!     options: [admin, user]
//!     allow_enter_row_change: true
//!   - source: active
//!     editor: checkbox
//!     key: active-flag
//! ```
//!
//! A column with `property` reports edits under that property name. A column
//! without one gets a generated path and shows the `source` field.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::column::{EditColumn, EditColumnConfigurator, EditHandler, EditorConfig, EditorType};
use crate::error::GridError;
use crate::model::GridPro;
use crate::rows::Row;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub columns: Vec<SessionColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionColumn {
    /// Row property the column is bound to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    /// CSV header shown in the cells; defaults to `property`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub editor: EditorType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_enter_row_change: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_edit_mode: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl SessionColumn {
    pub fn editor_config(&self) -> Result<EditorConfig, GridError> {
        let mut editor = EditorConfig::new(self.editor.clone(), self.options.clone())?;
        if let Some(allow) = self.allow_enter_row_change {
            editor = editor.with_allow_enter_row_change(allow);
        }
        if let Some(preserve) = self.preserve_edit_mode {
            editor = editor.with_preserve_edit_mode(preserve);
        }
        Ok(editor)
    }

    /// CSV header the column shows
    pub fn source_header(&self) -> String {
        self.source
            .clone()
            .or_else(|| self.property.clone())
            .unwrap_or_default()
    }
}

impl Session {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse session")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session at {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid session at {}", path.display()))
    }

    /// Add every session column to `grid`
    ///
    /// `handler_for` builds the edit handler of each declared column. Stops at
    /// the first column the grid rejects; a rejected column is never added.
    pub fn apply(
        &self,
        grid: &mut GridPro<Row>,
        handler_for: impl Fn(&SessionColumn) -> EditHandler<Row>,
    ) -> Result<Vec<EditColumn>, GridError> {
        let mut added = Vec::with_capacity(self.columns.len());
        for declared in &self.columns {
            let configurator = EditColumnConfigurator::with_shared_handler(
                handler_for(declared),
                declared.editor_config()?,
            );
            if let Some(key) = &declared.key {
                let owned_by_self = declared.property.as_deref() == Some(key.as_str());
                if !owned_by_self && grid.column_by_key(key).is_some() {
                    return Err(GridError::DuplicateKey { key: key.clone() });
                }
            }
            let header = declared.source_header();
            let value_provider = move |row: &Row| row.get(&header).to_string();

            let column = match &declared.property {
                Some(property) => {
                    grid.add_edit_column_for_property(property.clone(), value_provider, configurator)?
                }
                None => grid.add_edit_column(value_provider, configurator)?,
            };
            if let Some(key) = &declared.key {
                if let Some(mut view) = grid.column_mut(&column) {
                    view.set_key(key.clone())?;
                }
            }
            added.push(column);
        }
        Ok(added)
    }
}

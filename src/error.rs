//! Error types for edit-column configuration and edit routing
//!
//! Two classes matter to callers:
//! - [`ConfigError`] is raised synchronously while building editor configuration.
//! - [`IdentityInconsistency`] aborts a single routed notification because the
//!   registry, the key mapping and the rendered surface disagree.
//!
//! [`GridError`] wraps both together with column lifecycle misuse.

use thiserror::Error;

use crate::model::ColumnId;

/// Invalid editor or grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("select editor requires at least one option")]
    EmptySelectOptions,

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("unknown editor type '{0}'")]
    UnknownEditorType(String),
}

/// The surface reported an item or column this grid does not know about
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityInconsistency {
    #[error("item representation has no string 'key' field: {item}")]
    MalformedItem { item: String },

    #[error("unknown item key '{key}' (client and server item sets diverged)")]
    UnknownItemKey { key: String },

    #[error("no edit column is bound to path '{path}'")]
    UnknownColumnPath { path: String },

    #[error("no edit column with internal id '{internal_id}'")]
    UnknownColumn { internal_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Inconsistency(#[from] IdentityInconsistency),

    #[error("path '{path}' is already bound to another edit column")]
    DuplicatePath { path: String },

    #[error("property path '{path}' has the form of a generated column id")]
    ReservedPath { path: String },

    #[error("duplicate column key '{key}'")]
    DuplicateKey { key: String },

    #[error("no column with key '{key}'")]
    UnknownKey { key: String },

    #[error("column {0} is not part of this grid")]
    ColumnRemoved(ColumnId),
}

impl GridError {
    /// Whether this error signals a divergence between grid and surface state
    pub fn is_inconsistency(&self) -> bool {
        matches!(self, GridError::Inconsistency(_))
    }
}

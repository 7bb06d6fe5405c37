//! Command types for the Elm-style architecture
//!
//! Commands are the outbound side of the surface channel: property updates
//! and column lifecycle notices that the embedder forwards to the rendered
//! grid. Delivery is fire-and-forget; nothing waits for an acknowledgment.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Side effects to perform on the rendered surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "detail", rename_all = "kebab-case")]
pub enum SurfaceCmd {
    /// A new edit column element exists, reporting edits under `path`
    AttachColumn { column: String, path: String },
    /// The column element was removed from the grid
    DetachColumn { column: String },
    /// Write one synchronized property of a column element
    SetProperty {
        column: String,
        property: String,
        value: Value,
    },
    /// Execute multiple commands
    Batch(Vec<SurfaceCmd>),
}

impl SurfaceCmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<SurfaceCmd>) -> Self {
        SurfaceCmd::Batch(cmds)
    }

    /// Internal id of the column this command targets, if any
    pub fn column(&self) -> Option<&str> {
        match self {
            SurfaceCmd::AttachColumn { column, .. }
            | SurfaceCmd::DetachColumn { column }
            | SurfaceCmd::SetProperty { column, .. } => Some(column),
            SurfaceCmd::Batch(_) => None,
        }
    }

    /// Flatten nested batches into a single ordered list
    pub fn flatten(self) -> Vec<SurfaceCmd> {
        match self {
            SurfaceCmd::Batch(cmds) => cmds.into_iter().flat_map(SurfaceCmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}

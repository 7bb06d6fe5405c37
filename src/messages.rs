//! Message types for the Elm-style architecture
//!
//! Inbound events from the rendered surface. Their JSON shape is
//! `{"event": "<name>", "detail": {...}}`, mirroring DOM custom events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events emitted by the interactive surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "detail", rename_all = "kebab-case")]
pub enum SurfaceMsg {
    /// A cell edit was confirmed
    ///
    /// `item` is the key-encoded row (`{"key": "..."}`), not a live reference.
    ItemPropertyChanged { item: Value, path: String },

    /// A synchronized column property changed on the surface side
    ///
    /// `column` is the internal id of the column element (`col3`).
    ColumnPropertyChanged {
        column: String,
        property: String,
        value: Value,
    },
}

impl SurfaceMsg {
    /// Build an edit notification for the row with the given key
    pub fn item_property_changed(key: impl Into<String>, path: impl Into<String>) -> Self {
        SurfaceMsg::ItemPropertyChanged {
            item: serde_json::json!({ "key": key.into() }),
            path: path.into(),
        }
    }

    pub fn column_property_changed(
        column: impl Into<String>,
        property: impl Into<String>,
        value: Value,
    ) -> Self {
        SurfaceMsg::ColumnPropertyChanged {
            column: column.into(),
            property: property.into(),
            value,
        }
    }

    /// Parse one JSON-encoded event
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

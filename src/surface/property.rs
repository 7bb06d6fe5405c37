//! Synchronized column properties and their wire contract

use serde_json::Value;

/// Column element properties kept in sync with the rendered surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncedProperty {
    EditorType,
    EditorOptions,
    AllowEnterRowChange,
    PreserveEditMode,
}

impl SyncedProperty {
    pub const ALL: [SyncedProperty; 4] = [
        SyncedProperty::EditorType,
        SyncedProperty::EditorOptions,
        SyncedProperty::AllowEnterRowChange,
        SyncedProperty::PreserveEditMode,
    ];

    /// Property name on the wire
    pub fn name(self) -> &'static str {
        match self {
            SyncedProperty::EditorType => "editorType",
            SyncedProperty::EditorOptions => "editorOptions",
            SyncedProperty::AllowEnterRowChange => "allowEnterRowChange",
            SyncedProperty::PreserveEditMode => "preserveEditMode",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// DOM event the surface fires when it changes this property itself
    pub fn change_event(self) -> &'static str {
        match self {
            SyncedProperty::EditorType => "editor-type-changed",
            SyncedProperty::EditorOptions => "editor-options-changed",
            SyncedProperty::AllowEnterRowChange => "allow-enter-row-change-changed",
            SyncedProperty::PreserveEditMode => "preserve-edit-mode-changed",
        }
    }

    /// Value reported when nothing has been set
    pub fn default_value(self) -> Value {
        match self {
            SyncedProperty::EditorType => Value::String("text".to_string()),
            SyncedProperty::EditorOptions => Value::Array(Vec::new()),
            SyncedProperty::AllowEnterRowChange | SyncedProperty::PreserveEditMode => {
                Value::Bool(false)
            }
        }
    }

    /// Whether `value` has the JSON shape this property carries
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            SyncedProperty::EditorType => value.is_string() || value.is_null(),
            SyncedProperty::EditorOptions => match value {
                Value::Array(items) => items.iter().all(Value::is_string),
                Value::Null => true,
                _ => false,
            },
            SyncedProperty::AllowEnterRowChange | SyncedProperty::PreserveEditMode => {
                value.is_boolean() || value.is_null()
            }
        }
    }
}

//! Editor type and editor configuration value types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Kind of input control shown while a cell is being edited
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EditorType {
    #[default]
    Text,
    Checkbox,
    Select,
    /// Editor type reported by the surface that this crate has no variant for
    Other(String),
}

impl EditorType {
    /// Wire name used for the `editorType` surface property
    pub fn type_name(&self) -> &str {
        match self {
            EditorType::Text => "text",
            EditorType::Checkbox => "checkbox",
            EditorType::Select => "select",
            EditorType::Other(name) => name,
        }
    }

    /// Parse a wire name, keeping unknown names as [`EditorType::Other`]
    ///
    /// An empty name is the unset value and maps to [`EditorType::Text`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "text" => EditorType::Text,
            "checkbox" | "boolean" => EditorType::Checkbox,
            "select" => EditorType::Select,
            _ => EditorType::Other(name.to_string()),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, EditorType::Select)
    }
}

impl fmt::Display for EditorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Strict parsing for configuration files: unknown names are rejected
impl FromStr for EditorType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match EditorType::from_name(s) {
            EditorType::Other(name) => Err(ConfigError::UnknownEditorType(name)),
            known => Ok(known),
        }
    }
}

impl Serialize for EditorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

impl<'de> Deserialize<'de> for EditorType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable description of one column's editor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorConfig {
    editor_type: EditorType,
    options: Vec<String>,
    allow_enter_row_change: Option<bool>,
    preserve_edit_mode: Option<bool>,
}

impl EditorConfig {
    /// Create a config for the given type
    ///
    /// `options` are kept only for [`EditorType::Select`], which requires at
    /// least one of them.
    pub fn new(editor_type: EditorType, options: Vec<String>) -> Result<Self, ConfigError> {
        let options = if editor_type.is_select() {
            if options.is_empty() {
                return Err(ConfigError::EmptySelectOptions);
            }
            options
        } else {
            Vec::new()
        };

        Ok(Self {
            editor_type,
            options,
            allow_enter_row_change: None,
            preserve_edit_mode: None,
        })
    }

    pub fn text() -> Self {
        Self::default()
    }

    pub fn checkbox() -> Self {
        Self {
            editor_type: EditorType::Checkbox,
            ..Self::default()
        }
    }

    pub fn select<I, S>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            EditorType::Select,
            options.into_iter().map(Into::into).collect(),
        )
    }

    pub fn with_allow_enter_row_change(mut self, allow: bool) -> Self {
        self.allow_enter_row_change = Some(allow);
        self
    }

    pub fn with_preserve_edit_mode(mut self, preserve: bool) -> Self {
        self.preserve_edit_mode = Some(preserve);
        self
    }

    pub fn editor_type(&self) -> &EditorType {
        &self.editor_type
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Effective flag: moving to the next row when an edit is confirmed with Enter
    pub fn allow_enter_row_change(&self) -> bool {
        self.allow_enter_row_change.unwrap_or(false)
    }

    /// Effective flag: keeping the editor open after a confirmed edit
    pub fn preserve_edit_mode(&self) -> bool {
        self.preserve_edit_mode.unwrap_or(false)
    }

    /// The explicitly specified flag, `None` when left at the default
    pub fn allow_enter_row_change_setting(&self) -> Option<bool> {
        self.allow_enter_row_change
    }

    pub fn preserve_edit_mode_setting(&self) -> Option<bool> {
        self.preserve_edit_mode
    }

    /// Fill unspecified flags from grid-wide fallbacks
    pub(crate) fn with_fallbacks(
        mut self,
        allow_enter_row_change: Option<bool>,
        preserve_edit_mode: Option<bool>,
    ) -> Self {
        self.allow_enter_row_change = self.allow_enter_row_change.or(allow_enter_row_change);
        self.preserve_edit_mode = self.preserve_edit_mode.or(preserve_edit_mode);
        self
    }

    // Facade setters mirror into this snapshot without revalidating.

    pub(crate) fn set_editor_type(&mut self, editor_type: EditorType) {
        self.editor_type = editor_type;
    }

    pub(crate) fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub(crate) fn set_allow_enter_row_change(&mut self, allow: bool) {
        self.allow_enter_row_change = Some(allow);
    }

    pub(crate) fn set_preserve_edit_mode(&mut self, preserve: bool) {
        self.preserve_edit_mode = Some(preserve);
    }
}

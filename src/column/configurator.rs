//! Builder pairing an edit handler with its editor configuration

use std::fmt;
use std::rc::Rc;

use super::editor::{EditorConfig, EditorType};
use crate::error::ConfigError;

/// Callback invoked with the resolved row item and the edited property path
pub type EditHandler<T> = Rc<dyn Fn(&T, &str)>;

/// Everything needed to add an edit column to a grid
pub struct EditColumnConfigurator<T> {
    handler: EditHandler<T>,
    editor: EditorConfig,
}

impl<T> EditColumnConfigurator<T> {
    pub fn new(handler: impl Fn(&T, &str) + 'static, editor: EditorConfig) -> Self {
        Self {
            handler: Rc::new(handler),
            editor,
        }
    }

    /// Text field editor
    pub fn text(handler: impl Fn(&T, &str) + 'static) -> Self {
        Self::new(handler, EditorConfig::text())
    }

    /// Checkbox editor
    pub fn checkbox(handler: impl Fn(&T, &str) + 'static) -> Self {
        Self::new(handler, EditorConfig::checkbox())
    }

    /// Select editor offering `options` in the given order
    pub fn select<I, S>(handler: impl Fn(&T, &str) + 'static, options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(handler, EditorConfig::select(options)?))
    }

    /// Reuse an existing handler, e.g. one shared across several columns
    pub fn with_shared_handler(handler: EditHandler<T>, editor: EditorConfig) -> Self {
        Self { handler, editor }
    }

    pub fn with_allow_enter_row_change(mut self, allow: bool) -> Self {
        self.editor = self.editor.with_allow_enter_row_change(allow);
        self
    }

    pub fn with_preserve_edit_mode(mut self, preserve: bool) -> Self {
        self.editor = self.editor.with_preserve_edit_mode(preserve);
        self
    }

    pub fn handler(&self) -> &EditHandler<T> {
        &self.handler
    }

    pub fn editor(&self) -> &EditorConfig {
        &self.editor
    }

    pub fn editor_type(&self) -> &EditorType {
        self.editor.editor_type()
    }

    pub(crate) fn into_parts(self) -> (EditHandler<T>, EditorConfig) {
        (self.handler, self.editor)
    }
}

impl<T> fmt::Debug for EditColumnConfigurator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditColumnConfigurator")
            .field("editor", &self.editor)
            .finish_non_exhaustive()
    }
}

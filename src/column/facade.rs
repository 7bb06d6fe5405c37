//! Public edit-column handle and its accessor views
//!
//! [`EditColumn`] is what `add_edit_column` hands back. It only carries the
//! column identifier; the grid turns it into a view with
//! `GridPro::column` / `GridPro::column_mut`, and the view reaches the
//! registry entry and the live surface element for that identifier.

use serde_json::Value;

use super::configurator::EditHandler;
use super::editor::{EditorConfig, EditorType};
use crate::error::GridError;
use crate::model::registry::{ColumnEntry, EntrySlot};
use crate::model::ColumnId;
use crate::surface::{ColumnElement, ElementWriter, SyncedProperty};

/// Handle to an edit column; equal iff the identifiers are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditColumn {
    id: ColumnId,
}

impl EditColumn {
    pub(crate) fn new(id: ColumnId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Identifier of the column element on the surface
    pub fn internal_id(&self) -> String {
        self.id.internal_id()
    }
}

// ============================================================================
// Read-only view
// ============================================================================

/// Read access to one live edit column
pub struct EditColumnRef<'a, T> {
    entry: &'a ColumnEntry<T>,
    element: &'a ColumnElement,
}

impl<'a, T> EditColumnRef<'a, T> {
    pub(crate) fn new(entry: &'a ColumnEntry<T>, element: &'a ColumnElement) -> Self {
        Self { entry, element }
    }

    pub fn column(&self) -> EditColumn {
        self.entry.column
    }

    pub fn id(&self) -> ColumnId {
        self.entry.column.id()
    }

    /// Property path edits of this column are reported under
    pub fn path(&self) -> &'a str {
        &self.entry.path
    }

    pub fn key(&self) -> Option<&'a str> {
        self.entry.key.as_deref()
    }

    pub fn editor_type(&self) -> EditorType {
        self.element.editor_type()
    }

    pub fn options(&self) -> Vec<String> {
        self.element.options()
    }

    pub fn allow_enter_row_change(&self) -> bool {
        self.element.allow_enter_row_change()
    }

    pub fn preserve_edit_mode(&self) -> bool {
        self.element.preserve_edit_mode()
    }

    pub fn handler(&self) -> &'a EditHandler<T> {
        &self.entry.handler
    }

    /// Editor configuration as last set from the application side
    pub fn editor_config(&self) -> &'a EditorConfig {
        &self.entry.editor
    }

    /// Cell text for `item`, if the column was added with a value provider
    pub fn value(&self, item: &T) -> Option<String> {
        self.entry.value_provider.as_ref().map(|provider| provider(item))
    }
}

// ============================================================================
// Mutable view
// ============================================================================

/// Read/write access to one live edit column
///
/// Setters for synchronized properties write the surface element and queue a
/// property update; they return `&mut Self` so calls can be chained.
pub struct EditColumnMut<'a, T> {
    slot: EntrySlot<'a, T>,
    writer: ElementWriter<'a>,
}

impl<'a, T> EditColumnMut<'a, T> {
    pub(crate) fn new(slot: EntrySlot<'a, T>, writer: ElementWriter<'a>) -> Self {
        Self { slot, writer }
    }

    /// Borrow as a read-only view
    pub fn view(&self) -> EditColumnRef<'_, T> {
        EditColumnRef::new(&*self.slot.entry, self.writer.element())
    }

    pub fn column(&self) -> EditColumn {
        self.slot.entry.column
    }

    pub fn editor_type(&self) -> EditorType {
        self.writer.element().editor_type()
    }

    pub fn options(&self) -> Vec<String> {
        self.writer.element().options()
    }

    pub fn allow_enter_row_change(&self) -> bool {
        self.writer.element().allow_enter_row_change()
    }

    pub fn preserve_edit_mode(&self) -> bool {
        self.writer.element().preserve_edit_mode()
    }

    pub fn handler(&self) -> &EditHandler<T> {
        &self.slot.entry.handler
    }

    /// Set the editor type; `None` means the default text editor
    pub fn set_editor_type(&mut self, editor_type: impl Into<Option<EditorType>>) -> &mut Self {
        let editor_type = editor_type.into().unwrap_or_default();
        self.writer.set(
            SyncedProperty::EditorType,
            Value::String(editor_type.type_name().to_string()),
        );
        self.slot.entry.editor.set_editor_type(editor_type);
        self
    }

    pub fn set_options<I, S>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        self.writer.set(
            SyncedProperty::EditorOptions,
            Value::Array(options.iter().cloned().map(Value::String).collect()),
        );
        self.slot.entry.editor.set_options(options);
        self
    }

    pub fn set_allow_enter_row_change(&mut self, allow: bool) -> &mut Self {
        self.writer
            .set(SyncedProperty::AllowEnterRowChange, Value::Bool(allow));
        self.slot.entry.editor.set_allow_enter_row_change(allow);
        self
    }

    pub fn set_preserve_edit_mode(&mut self, preserve: bool) -> &mut Self {
        self.writer
            .set(SyncedProperty::PreserveEditMode, Value::Bool(preserve));
        self.slot.entry.editor.set_preserve_edit_mode(preserve);
        self
    }

    /// Replace the edit handler (local only, nothing reaches the surface)
    pub fn set_handler(&mut self, handler: impl Fn(&T, &str) + 'static) -> &mut Self {
        self.set_shared_handler(std::rc::Rc::new(handler))
    }

    pub fn set_shared_handler(&mut self, handler: EditHandler<T>) -> &mut Self {
        self.slot.entry.handler = handler;
        self
    }

    /// Assign the application key used by `GridPro::column_by_key`
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<&mut Self, GridError> {
        self.slot.set_key(key.into())?;
        Ok(self)
    }
}

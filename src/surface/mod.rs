//! Rendered-surface property channel
//!
//! Every edit column has an element on the interactive surface. The element's
//! synchronized properties live here, in one store that both sides write:
//!
//! ```text
//! setter ──► ColumnElement ──► SurfaceCmd::SetProperty ──► surface
//! surface ─► SurfaceMsg::ColumnPropertyChanged ─► ColumnElement
//! getter ◄── ColumnElement
//! ```
//!
//! Getters never cache: they read whatever the store currently holds and fall
//! back to the wire default for properties that were never set.

mod property;

use std::collections::HashMap;

use serde_json::Value;

use crate::column::EditorType;
use crate::commands::SurfaceCmd;
use crate::model::ColumnId;

pub use property::SyncedProperty;

/// Property state of one column element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnElement {
    properties: HashMap<SyncedProperty, Value>,
}

impl ColumnElement {
    /// Current value, or the wire default when unset
    fn value(&self, property: SyncedProperty) -> Value {
        self.properties
            .get(&property)
            .cloned()
            .unwrap_or_else(|| property.default_value())
    }

    pub fn editor_type(&self) -> EditorType {
        self.value(SyncedProperty::EditorType)
            .as_str()
            .map(EditorType::from_name)
            .unwrap_or_default()
    }

    pub fn options(&self) -> Vec<String> {
        match self.value(SyncedProperty::EditorOptions) {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn allow_enter_row_change(&self) -> bool {
        self.flag(SyncedProperty::AllowEnterRowChange)
    }

    pub fn preserve_edit_mode(&self) -> bool {
        self.flag(SyncedProperty::PreserveEditMode)
    }

    fn flag(&self, property: SyncedProperty) -> bool {
        self.value(property).as_bool().unwrap_or(false)
    }

    /// Store a value; `null` clears the property back to its default
    fn store(&mut self, property: SyncedProperty, value: Value) {
        if value.is_null() {
            self.properties.remove(&property);
        } else {
            self.properties.insert(property, value);
        }
    }
}

/// Borrowed handle for locally originated writes to one element
pub struct ElementWriter<'a> {
    id: ColumnId,
    element: &'a mut ColumnElement,
    pending: &'a mut Vec<SurfaceCmd>,
}

impl ElementWriter<'_> {
    pub fn element(&self) -> &ColumnElement {
        &*self.element
    }

    /// Store `value` and queue the matching [`SurfaceCmd::SetProperty`]
    pub fn set(&mut self, property: SyncedProperty, value: Value) {
        self.element.store(property, value.clone());
        self.pending.push(SurfaceCmd::SetProperty {
            column: self.id.internal_id(),
            property: property.name().to_string(),
            value,
        });
    }
}

/// Outcome of applying a surface-originated property change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteChange {
    Applied,
    /// Not one of the synchronized properties
    UnknownProperty,
    /// Value has the wrong JSON shape for the property
    InvalidValue,
}

/// Column elements of one grid plus the queue of outbound commands
#[derive(Debug, Default)]
pub struct Surface {
    elements: HashMap<ColumnId, ColumnElement>,
    pending: Vec<SurfaceCmd>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the element for a newly registered column
    ///
    /// Returns a writer for the fresh element so initial properties follow
    /// the attach command in the outbound queue.
    pub fn attach(&mut self, id: ColumnId, path: &str) -> ElementWriter<'_> {
        self.pending.push(SurfaceCmd::AttachColumn {
            column: id.internal_id(),
            path: path.to_string(),
        });
        let element = self
            .elements
            .entry(id)
            .and_modify(|element| *element = ColumnElement::default())
            .or_default();
        ElementWriter {
            id,
            element,
            pending: &mut self.pending,
        }
    }

    pub fn detach(&mut self, id: ColumnId) -> Option<ColumnElement> {
        let element = self.elements.remove(&id)?;
        self.pending.push(SurfaceCmd::DetachColumn {
            column: id.internal_id(),
        });
        Some(element)
    }

    pub fn element(&self, id: ColumnId) -> Option<&ColumnElement> {
        self.elements.get(&id)
    }

    /// Write access to one element together with the outbound queue
    pub fn writer(&mut self, id: ColumnId) -> Option<ElementWriter<'_>> {
        let element = self.elements.get_mut(&id)?;
        Some(ElementWriter {
            id,
            element,
            pending: &mut self.pending,
        })
    }

    /// Surface-originated write: stored, nothing queued (the surface already has it)
    ///
    /// Returns `None` if the column has no element.
    pub fn apply_remote(&mut self, id: ColumnId, property: &str, value: Value) -> Option<RemoteChange> {
        let element = self.elements.get_mut(&id)?;
        let Some(property) = SyncedProperty::from_name(property) else {
            return Some(RemoteChange::UnknownProperty);
        };
        if !property.accepts(&value) {
            return Some(RemoteChange::InvalidValue);
        }
        element.store(property, value);
        Some(RemoteChange::Applied)
    }

    /// Group every command queued since `mark` into one batch
    pub(crate) fn batch_since(&mut self, mark: usize) {
        if self.pending.len() > mark + 1 {
            let cmds = self.pending.split_off(mark);
            self.pending.push(SurfaceCmd::batch(cmds));
        }
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drain queued commands in the order they were produced
    pub fn take_commands(&mut self) -> Vec<SurfaceCmd> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(n: &str) -> ColumnId {
        ColumnId::from_internal_id(n).unwrap()
    }

    #[test]
    fn test_unset_properties_report_defaults() {
        let mut surface = Surface::new();
        surface.attach(column("col0"), "col0");
        let element = surface.element(column("col0")).unwrap();
        assert_eq!(element.editor_type(), EditorType::Text);
        assert!(element.options().is_empty());
        assert!(!element.allow_enter_row_change());
        assert!(!element.preserve_edit_mode());
        assert!(element.properties.is_empty());
    }

    #[test]
    fn test_writer_queues_command() {
        let mut surface = Surface::new();
        let id = column("col3");
        surface.attach(id, "name");
        surface.take_commands();

        surface
            .writer(id)
            .unwrap()
            .set(SyncedProperty::PreserveEditMode, json!(true));
        assert_eq!(
            surface.take_commands(),
            vec![SurfaceCmd::SetProperty {
                column: "col3".into(),
                property: "preserveEditMode".into(),
                value: json!(true),
            }]
        );
        assert!(surface.element(id).unwrap().preserve_edit_mode());
    }

    #[test]
    fn test_apply_remote_updates_without_queueing() {
        let mut surface = Surface::new();
        let id = column("col1");
        surface.attach(id, "col1");
        surface.take_commands();

        let change = surface.apply_remote(id, "editorOptions", json!(["x", "y"]));
        assert_eq!(change, Some(RemoteChange::Applied));
        assert_eq!(surface.element(id).unwrap().options(), vec!["x", "y"]);
        assert!(surface.take_commands().is_empty());
    }

    #[test]
    fn test_apply_remote_rejects_unknown_and_invalid() {
        let mut surface = Surface::new();
        let id = column("col1");
        surface.attach(id, "col1");

        assert_eq!(
            surface.apply_remote(id, "frozen", json!(true)),
            Some(RemoteChange::UnknownProperty)
        );
        assert_eq!(
            surface.apply_remote(id, "allowEnterRowChange", json!("true")),
            Some(RemoteChange::InvalidValue)
        );
        assert_eq!(surface.apply_remote(column("col9"), "editorType", json!("text")), None);
    }

    #[test]
    fn test_null_resets_to_default() {
        let mut surface = Surface::new();
        let id = column("col0");
        surface.attach(id, "col0");
        surface
            .writer(id)
            .unwrap()
            .set(SyncedProperty::EditorType, json!("select"));
        surface.apply_remote(id, "editorType", Value::Null);
        assert_eq!(surface.element(id).unwrap().editor_type(), EditorType::Text);
    }

    #[test]
    fn test_detach_removes_element_and_queues_notice() {
        let mut surface = Surface::new();
        let id = column("col2");
        surface.attach(id, "col2");
        surface.take_commands();

        assert!(surface.detach(id).is_some());
        assert!(surface.element(id).is_none());
        assert!(surface.writer(id).is_none());
        assert_eq!(
            surface.take_commands(),
            vec![SurfaceCmd::DetachColumn {
                column: "col2".into()
            }]
        );
    }

    #[test]
    fn test_batch_since_groups_commands() {
        let mut surface = Surface::new();
        let id = column("col0");
        let mark = surface.pending_len();
        surface
            .attach(id, "col0")
            .set(SyncedProperty::EditorType, json!("checkbox"));
        surface.batch_since(mark);

        let cmds = surface.take_commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].clone().flatten().len(), 2);
    }
}

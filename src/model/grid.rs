//! The grid: owner of the column registry, surface state, key mapping and
//! edit router
//!
//! Inbound surface messages are serialized through an inbox. A handler (or
//! anything else holding a [`GridPro::sender`]) may post while a dispatch is
//! in flight; the message is handled after the current one returns.

use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use serde_json::Value;

use super::key_mapper::{DataKeyMapper, KeyMapper};
use super::registry::{ColumnPath, ColumnRegistry, ValueProvider};
use crate::column::{EditColumn, EditColumnConfigurator, EditColumnMut, EditColumnRef};
use crate::commands::SurfaceCmd;
use crate::config::GridConfig;
use crate::error::{ConfigError, GridError};
use crate::messages::SurfaceMsg;
use crate::surface::{Surface, SyncedProperty};
use crate::update::{
    update, ItemPropertyChangedEvent, ListenerRegistration, PropertyChangeRouter, RouterState,
    UpdateOutcome,
};

pub struct GridPro<T> {
    pub(crate) registry: ColumnRegistry<T>,
    pub(crate) surface: Surface,
    pub(crate) key_mapper: Box<dyn KeyMapper<T>>,
    pub(crate) router: PropertyChangeRouter<T>,
    config: GridConfig,
    inbox_tx: Sender<SurfaceMsg>,
    inbox_rx: Receiver<SurfaceMsg>,
}

impl<T: PartialEq + 'static> GridPro<T> {
    /// Grid with default configuration and the sequential key mapper
    pub fn new() -> Self {
        Self::from_parts(GridConfig::default(), Box::new(DataKeyMapper::new()))
    }

    pub fn with_config(config: GridConfig) -> Result<Self, ConfigError> {
        Self::with_key_mapper(config, Box::new(DataKeyMapper::new()))
    }

    /// Grid with the given page size (must be greater than zero)
    pub fn with_page_size(page_size: usize) -> Result<Self, ConfigError> {
        Self::with_config(GridConfig::with_page_size(page_size)?)
    }
}

impl<T: PartialEq + 'static> Default for GridPro<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> GridPro<T> {
    pub fn with_key_mapper(
        config: GridConfig,
        key_mapper: Box<dyn KeyMapper<T>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, key_mapper))
    }

    fn from_parts(config: GridConfig, key_mapper: Box<dyn KeyMapper<T>>) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        Self {
            registry: ColumnRegistry::new(),
            surface: Surface::new(),
            key_mapper,
            router: PropertyChangeRouter::new(),
            config,
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Replace the item set, returning the surface key of each item in order
    ///
    /// Every item gets its own key, equal items included.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) -> Vec<String> {
        self.key_mapper.clear();
        let keys: Vec<String> = items
            .into_iter()
            .map(|item| self.key_mapper.insert(item))
            .collect();
        tracing::debug!(count = keys.len(), "replaced grid items");
        keys
    }

    /// Add one item, returning its surface key
    pub fn add_item(&mut self, item: T) -> String {
        self.key_mapper.key_for(item)
    }

    pub fn item(&self, key: &str) -> Option<&T> {
        self.key_mapper.get(key)
    }

    pub fn remove_item(&mut self, key: &str) -> Option<T> {
        self.key_mapper.remove(key)
    }

    pub fn key_mapper(&self) -> &dyn KeyMapper<T> {
        &*self.key_mapper
    }

    // ========================================================================
    // Edit columns
    // ========================================================================

    /// Add an edit column whose cells show `value_provider(item)`
    ///
    /// The column reports edits under its generated internal id.
    pub fn add_edit_column(
        &mut self,
        value_provider: impl Fn(&T) -> String + 'static,
        configurator: EditColumnConfigurator<T>,
    ) -> Result<EditColumn, GridError> {
        self.add_column(ColumnPath::Generated, Some(Rc::new(value_provider)), configurator)
    }

    /// Add an edit column bound to a named row property
    ///
    /// The property name becomes both the edit path and the column key.
    pub fn add_edit_column_for_property(
        &mut self,
        property: impl Into<String>,
        value_provider: impl Fn(&T) -> String + 'static,
        configurator: EditColumnConfigurator<T>,
    ) -> Result<EditColumn, GridError> {
        let property = property.into();
        if self.registry.column_by_key(&property).is_some() {
            return Err(GridError::DuplicateKey { key: property });
        }
        let column = self.add_column(
            ColumnPath::Property(property.clone()),
            Some(Rc::new(value_provider)),
            configurator,
        )?;
        self.registry.set_key(column.id(), property)?;
        Ok(column)
    }

    fn add_column(
        &mut self,
        path: ColumnPath,
        value_provider: Option<ValueProvider<T>>,
        configurator: EditColumnConfigurator<T>,
    ) -> Result<EditColumn, GridError> {
        let (handler, editor) = configurator.into_parts();
        let editor = editor.with_fallbacks(
            self.config.editor.allow_enter_row_change,
            self.config.editor.preserve_edit_mode,
        );

        let column = self
            .registry
            .register(handler, editor.clone(), path, value_provider)?;
        let path = self
            .registry
            .lookup(column.id())
            .map(|entry| entry.path().to_string())
            .ok_or(GridError::ColumnRemoved(column.id()))?;

        let mark = self.surface.pending_len();
        let mut writer = self.surface.attach(column.id(), &path);
        writer.set(
            SyncedProperty::EditorType,
            Value::String(editor.editor_type().type_name().to_string()),
        );
        writer.set(
            SyncedProperty::EditorOptions,
            Value::Array(editor.options().iter().cloned().map(Value::String).collect()),
        );
        if let Some(allow) = editor.allow_enter_row_change_setting() {
            writer.set(SyncedProperty::AllowEnterRowChange, Value::Bool(allow));
        }
        if let Some(preserve) = editor.preserve_edit_mode_setting() {
            writer.set(SyncedProperty::PreserveEditMode, Value::Bool(preserve));
        }
        self.surface.batch_since(mark);

        tracing::debug!(
            column = %column.id(),
            path = %path,
            editor = %editor.editor_type(),
            "added edit column"
        );
        Ok(column)
    }

    /// Read access to a live column, `None` once it was removed
    pub fn column(&self, column: &EditColumn) -> Option<EditColumnRef<'_, T>> {
        let entry = self.registry.lookup(column.id())?;
        let element = self.surface.element(column.id())?;
        Some(EditColumnRef::new(entry, element))
    }

    pub fn column_mut(&mut self, column: &EditColumn) -> Option<EditColumnMut<'_, T>> {
        let slot = self.registry.slot(column.id())?;
        let writer = self.surface.writer(column.id())?;
        Some(EditColumnMut::new(slot, writer))
    }

    pub fn column_by_key(&self, key: &str) -> Option<EditColumn> {
        self.registry.column_by_key(key)
    }

    /// Column whose edits are reported under `path`
    pub fn column_by_path(&self, path: &str) -> Option<EditColumn> {
        self.registry
            .lookup_path(path)
            .and_then(|id| self.registry.lookup(id))
            .map(|entry| entry.column())
    }

    /// Snapshot of the live edit columns, in no particular order
    pub fn columns(&self) -> Vec<EditColumn> {
        self.registry.columns()
    }

    pub fn column_count(&self) -> usize {
        self.registry.len()
    }

    pub fn remove_column(&mut self, column: &EditColumn) -> Result<(), GridError> {
        let id = column.id();
        self.registry
            .unregister(id)
            .ok_or(GridError::ColumnRemoved(id))?;
        self.surface.detach(id);
        tracing::debug!(column = %id, "removed edit column");
        Ok(())
    }

    pub fn remove_column_by_key(&mut self, key: &str) -> Result<(), GridError> {
        let column = self
            .registry
            .column_by_key(key)
            .ok_or_else(|| GridError::UnknownKey {
                key: key.to_string(),
            })?;
        self.remove_column(&column)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Subscribe to edits that were routed to a column handler
    pub fn add_item_property_changed_listener(
        &mut self,
        listener: impl Fn(&ItemPropertyChangedEvent<'_, T>) + 'static,
    ) -> ListenerRegistration {
        self.router.add_listener(listener)
    }

    pub fn remove_item_property_changed_listener(
        &mut self,
        registration: ListenerRegistration,
    ) -> bool {
        self.router.remove_listener(registration)
    }

    pub fn router_state(&self) -> RouterState {
        self.router.state()
    }

    /// Edits routed to a column handler over the grid's lifetime
    pub fn dispatched_edits(&self) -> u64 {
        self.router.dispatched()
    }

    /// Handle one surface message immediately
    pub fn handle(&mut self, msg: SurfaceMsg) -> Result<UpdateOutcome, GridError> {
        update(self, msg)
    }

    /// Sender for posting surface messages into the inbox
    pub fn sender(&self) -> Sender<SurfaceMsg> {
        self.inbox_tx.clone()
    }

    pub fn post(&self, msg: SurfaceMsg) {
        // The receiver lives in `self`, so the channel cannot be disconnected here
        let _ = self.inbox_tx.send(msg);
    }

    /// Handle every queued message in arrival order
    ///
    /// Messages posted while this runs are handled in the same call. Each
    /// failure aborts only its own message.
    pub fn process_pending(&mut self) -> Vec<Result<UpdateOutcome, GridError>> {
        let mut results = Vec::new();
        while let Ok(msg) = self.inbox_rx.try_recv() {
            results.push(update(self, msg));
        }
        results
    }

    /// Drain outbound surface commands
    pub fn take_commands(&mut self) -> Vec<SurfaceCmd> {
        self.surface.take_commands()
    }
}

impl<T> fmt::Debug for GridPro<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridPro")
            .field("columns", &self.registry.len())
            .field("items", &self.key_mapper.len())
            .field("router", &self.router)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

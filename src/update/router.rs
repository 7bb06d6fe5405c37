//! Edit notification routing
//!
//! Turns a wire-shaped `item-property-changed` notification into exactly one
//! typed handler call. Resolution happens in a fixed order and nothing is
//! invoked unless every step succeeds:
//!
//! 1. item representation → key → live item (key mapper)
//! 2. property path → column identifier (registry path index)
//! 3. column identifier → registry entry
//! 4. handler, then item-property-changed listeners
//!
//! No step is retried. A failure means the surface and the grid disagree
//! about which rows or columns exist.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::column::EditColumn;
use crate::error::IdentityInconsistency;
use crate::model::registry::ColumnRegistry;
use crate::model::KeyMapper;

/// Router state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
    #[default]
    Idle,
    /// A handler invocation is in flight
    Dispatching,
}

/// Grid-level event fired once per successfully routed notification
#[derive(Debug)]
pub struct ItemPropertyChangedEvent<'a, T> {
    pub item: &'a T,
    pub key: &'a str,
    pub path: &'a str,
    pub column: EditColumn,
}

type Listener<T> = Rc<dyn Fn(&ItemPropertyChangedEvent<'_, T>)>;

/// Handle returned when subscribing to item-property-changed events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerRegistration(u64);

/// Summary of a routed notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEdit {
    pub column: EditColumn,
    pub key: String,
    pub path: String,
}

pub struct PropertyChangeRouter<T> {
    state: Cell<RouterState>,
    listeners: Vec<(ListenerRegistration, Listener<T>)>,
    next_listener_id: u64,
    dispatched: u64,
}

impl<T> Default for PropertyChangeRouter<T> {
    fn default() -> Self {
        Self {
            state: Cell::new(RouterState::Idle),
            listeners: Vec::new(),
            next_listener_id: 0,
            dispatched: 0,
        }
    }
}

impl<T> fmt::Debug for PropertyChangeRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyChangeRouter")
            .field("state", &self.state.get())
            .field("listeners", &self.listeners.len())
            .field("dispatched", &self.dispatched)
            .finish()
    }
}

/// Resets the router to idle when a dispatch ends, including by unwinding
struct DispatchGuard<'a>(&'a Cell<RouterState>);

impl<'a> DispatchGuard<'a> {
    fn enter(state: &'a Cell<RouterState>) -> Self {
        debug_assert_eq!(state.get(), RouterState::Idle, "nested dispatch");
        state.set(RouterState::Dispatching);
        Self(state)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(RouterState::Idle);
    }
}

impl<T> PropertyChangeRouter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouterState {
        self.state.get()
    }

    /// Number of notifications dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn add_listener(
        &mut self,
        listener: impl Fn(&ItemPropertyChangedEvent<'_, T>) + 'static,
    ) -> ListenerRegistration {
        let registration = ListenerRegistration(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((registration, Rc::new(listener)));
        registration
    }

    /// Unsubscribe; returns `false` if the registration was already removed
    pub fn remove_listener(&mut self, registration: ListenerRegistration) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(r, _)| *r != registration);
        self.listeners.len() != before
    }

    /// Resolve a notification and invoke its column handler exactly once
    pub fn route(
        &mut self,
        registry: &ColumnRegistry<T>,
        key_mapper: &dyn KeyMapper<T>,
        item: &Value,
        path: &str,
    ) -> Result<RoutedEdit, IdentityInconsistency> {
        let key = item
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| IdentityInconsistency::MalformedItem {
                item: item.to_string(),
            })?;

        let resolved = key_mapper
            .get(key)
            .ok_or_else(|| IdentityInconsistency::UnknownItemKey {
                key: key.to_string(),
            })?;

        let entry = registry
            .lookup_path(path)
            .and_then(|id| registry.lookup(id))
            .ok_or_else(|| IdentityInconsistency::UnknownColumnPath {
                path: path.to_string(),
            })?;

        let column = entry.column();
        let handler = Rc::clone(entry.handler());
        {
            let _guard = DispatchGuard::enter(&self.state);
            tracing::debug!(column = %column.id(), key, path, "dispatching edit");

            handler(resolved, path);

            let event = ItemPropertyChangedEvent {
                item: resolved,
                key,
                path,
                column,
            };
            for (_, listener) in &self.listeners {
                listener(&event);
            }
        }
        self.dispatched += 1;

        Ok(RoutedEdit {
            column,
            key: key.to_string(),
            path: path.to_string(),
        })
    }
}

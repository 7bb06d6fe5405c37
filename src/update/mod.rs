//! Update functions for the Elm-style architecture
//!
//! Every inbound surface message flows through [`update`].

pub mod router;
mod sync;

use crate::error::GridError;
use crate::messages::SurfaceMsg;
use crate::model::{ColumnId, GridPro};

#[cfg(debug_assertions)]
use tracing::{span, Level};

pub use router::{
    ItemPropertyChangedEvent, ListenerRegistration, PropertyChangeRouter, RoutedEdit,
    RouterState,
};
pub use sync::apply_column_property;

/// What handling a surface message did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An edit was dispatched to its column handler
    Routed(RoutedEdit),
    /// A synchronized column property was updated from the surface
    Synced { column: ColumnId, property: String },
    /// The message carried nothing this grid synchronizes
    Ignored,
}

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update<T: 'static>(grid: &mut GridPro<T>, msg: SurfaceMsg) -> Result<UpdateOutcome, GridError> {
    #[cfg(debug_assertions)]
    {
        update_traced(grid, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(grid, msg)
    }
}

fn update_inner<T: 'static>(grid: &mut GridPro<T>, msg: SurfaceMsg) -> Result<UpdateOutcome, GridError> {
    let result = match msg {
        SurfaceMsg::ItemPropertyChanged { item, path } => grid
            .router
            .route(&grid.registry, &*grid.key_mapper, &item, &path)
            .map(UpdateOutcome::Routed)
            .map_err(GridError::from),
        SurfaceMsg::ColumnPropertyChanged {
            column,
            property,
            value,
        } => apply_column_property(grid, &column, &property, value),
    };

    if let Err(err) = &result {
        if err.is_inconsistency() {
            tracing::error!(error = %err, "dropped surface message");
        }
    }
    result
}

#[cfg(debug_assertions)]
fn update_traced<T: 'static>(grid: &mut GridPro<T>, msg: SurfaceMsg) -> Result<UpdateOutcome, GridError> {
    let event = match &msg {
        SurfaceMsg::ItemPropertyChanged { .. } => "item-property-changed",
        SurfaceMsg::ColumnPropertyChanged { .. } => "column-property-changed",
    };
    let span = span!(Level::DEBUG, "surface_msg", event);
    let _enter = span.enter();

    let result = update_inner(grid, msg);
    tracing::trace!(?result, "handled");
    result
}

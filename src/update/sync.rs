//! Surface-originated column property changes

use serde_json::Value;

use crate::error::{GridError, IdentityInconsistency};
use crate::model::{ColumnId, GridPro};
use crate::surface::RemoteChange;

use super::UpdateOutcome;

/// Apply a `column-property-changed` event to the column's element
///
/// Unknown columns are an identity inconsistency; unknown properties and
/// mistyped values are outside the synchronized set and are ignored.
pub fn apply_column_property<T: 'static>(
    grid: &mut GridPro<T>,
    internal_id: &str,
    property: &str,
    value: Value,
) -> Result<UpdateOutcome, GridError> {
    let id = ColumnId::from_internal_id(internal_id)
        .filter(|id| grid.registry.contains(*id))
        .ok_or_else(|| IdentityInconsistency::UnknownColumn {
            internal_id: internal_id.to_string(),
        })?;

    match grid.surface.apply_remote(id, property, value) {
        Some(RemoteChange::Applied) => {
            tracing::debug!(column = %id, property, "synchronized column property from surface");
            Ok(UpdateOutcome::Synced {
                column: id,
                property: property.to_string(),
            })
        }
        Some(RemoteChange::UnknownProperty) => {
            tracing::warn!(column = %id, property, "ignoring unsynchronized column property");
            Ok(UpdateOutcome::Ignored)
        }
        Some(RemoteChange::InvalidValue) => {
            tracing::warn!(column = %id, property, "ignoring column property with invalid value");
            Ok(UpdateOutcome::Ignored)
        }
        None => Err(IdentityInconsistency::UnknownColumn {
            internal_id: internal_id.to_string(),
        }
        .into()),
    }
}

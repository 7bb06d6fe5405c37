//! Grid model - column registry, key mapping and the grid that owns them
//!
//! All state lives in [`GridPro`]; the update functions in [`crate::update`]
//! are the only code that changes it in response to surface messages.

pub mod grid;
pub mod key_mapper;
pub mod registry;

pub use grid::GridPro;
pub use key_mapper::{DataKeyMapper, KeyMapper};
pub use registry::{ColumnEntry, ColumnId, ColumnPath, ColumnRegistry, ValueProvider};

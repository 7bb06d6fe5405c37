//! Edit columns
//!
//! - [`EditorConfig`] / [`EditorType`]: what editor a column shows
//! - [`EditColumnConfigurator`]: handler plus editor config, consumed on add
//! - [`EditColumn`], [`EditColumnRef`], [`EditColumnMut`]: the public handle
//!   and its accessor views

mod configurator;
mod editor;
mod facade;

pub use configurator::{EditColumnConfigurator, EditHandler};
pub use editor::{EditorConfig, EditorType};
pub use facade::{EditColumn, EditColumnMut, EditColumnRef};

//! gridpro - inline cell editing for a data grid
//!
//! Edit columns declare an editor (text, checkbox, select) and a handler.
//! Editor properties are kept in sync with the rendered surface in both
//! directions, and confirmed edits reported by the surface are routed back
//! to the handler together with the live row item. State changes follow the
//! Elm Architecture: [`messages::SurfaceMsg`] in, [`update::update`],
//! [`commands::SurfaceCmd`] out.

pub mod column;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod messages;
pub mod model;
pub mod rows;
pub mod session;
pub mod surface;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use column::{EditColumn, EditColumnConfigurator, EditorConfig, EditorType};
pub use commands::SurfaceCmd;
pub use config::GridConfig;
pub use error::{ConfigError, GridError, IdentityInconsistency};
pub use messages::SurfaceMsg;
pub use model::{ColumnId, GridPro};

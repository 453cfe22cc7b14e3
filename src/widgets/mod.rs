//! Widgets and the widget collection manager.

pub mod errors;
pub mod manager;
pub mod registry;
pub mod types;

pub use errors::WidgetManagerError;
pub use manager::{StorageKeySaveStrategy, WidgetManager, WidgetSaveStrategy, WIDGETS_KEY};
pub use registry::{NoopWidgetRegistry, WidgetTypeRegistry};
pub use types::{JsonMap, Widget, WidgetId};

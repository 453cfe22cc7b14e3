use async_trait::async_trait;

use super::types::{JsonMap, Widget};
use crate::layout::GridSize;

/// Port into the widget-type registry, an external collaborator that knows
/// the concrete widget implementations. The domain consults it for creation
/// defaults and for per-widget hydration after a list is (re)loaded.
#[async_trait]
pub trait WidgetTypeRegistry: Send + Sync {
    /// Initial grid size for a newly created widget of `kind`.
    fn initial_size(&self, kind: &str) -> GridSize;

    /// Initial opaque configuration for a newly created widget of `kind`.
    fn initial_props(&self, _kind: &str) -> JsonMap {
        JsonMap::new()
    }

    /// Type-specific hydration, run once per widget after loading (e.g.
    /// filling in props added since the widget was persisted).
    async fn after_load(&self, widget: &mut Widget);
}

/// Registry that applies one fixed default size and performs no hydration.
#[derive(Debug, Default)]
pub struct NoopWidgetRegistry;

#[async_trait]
impl WidgetTypeRegistry for NoopWidgetRegistry {
    fn initial_size(&self, _kind: &str) -> GridSize {
        GridSize::new(5, 3)
    }

    async fn after_load(&self, _widget: &mut Widget) {}
}

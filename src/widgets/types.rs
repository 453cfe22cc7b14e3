use serde::{Deserialize, Serialize};

use crate::layout::{GridPoint, GridSize};

/// Widget IDs are unique within one workspace and assigned monotonically by
/// the [`WidgetManager`](super::WidgetManager).
pub type WidgetId = u64;

/// Opaque JSON mapping carried by widgets and backgrounds. The domain only
/// copies and persists it.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// A positioned, sized, typed unit of dashboard content.
///
/// `kind` discriminates into the widget-type registry; `props` and `theme`
/// are opaque to the domain. A widget may transiently lack a `position`
/// (newly created or freshly duplicated) until the placement resolver runs.
/// `Clone` is a deep copy, including the opaque `props`/`theme` trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<GridPoint>,
    pub size: GridSize,
    #[serde(default)]
    pub props: JsonMap,
    #[serde(default)]
    pub theme: JsonMap,
}

impl Widget {
    pub fn new(id: WidgetId, kind: impl Into<String>, size: GridSize) -> Self {
        Self {
            id,
            kind: kind.into(),
            position: None,
            size,
            props: JsonMap::new(),
            theme: JsonMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn widget_serializes_with_type_discriminator() {
        let widget = Widget::new(3, "Notes", GridSize::new(5, 3));
        let serialized = serde_json::to_value(&widget).unwrap();
        assert_eq!(serialized["type"], json!("Notes"));
        assert_eq!(serialized["size"], json!({"x": 5, "y": 3}));
        assert!(serialized.get("position").is_none());
    }

    #[test]
    fn widget_deserializes_legacy_record() {
        let raw = json!({
            "id": 7,
            "type": "Clock",
            "position": {"x": 1, "y": 2},
            "size": {"x": 4, "y": 2},
            "props": {"showSeconds": true},
            "theme": {}
        });
        let widget: Widget = serde_json::from_value(raw).unwrap();
        assert_eq!(widget.id, 7);
        assert_eq!(widget.kind, "Clock");
        assert_eq!(widget.position, Some(GridPoint::new(1, 2)));
        assert_eq!(widget.props["showSeconds"], json!(true));
    }

    #[test]
    fn clone_deep_copies_props() {
        let mut widget = Widget::new(1, "HTML", GridSize::new(2, 2));
        widget.props.insert("html".to_string(), json!("<b>hi</b>"));

        let mut copy = widget.clone();
        copy.props.insert("html".to_string(), json!("changed"));
        assert_eq!(widget.props["html"], json!("<b>hi</b>"));
    }
}

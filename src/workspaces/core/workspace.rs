use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{WorkspaceCoreError, MAX_WORKSPACE_NAME_LENGTH};
use super::types::{BackgroundConfig, WorkspaceId};
use crate::layout::GridSettings;
use crate::widgets::Widget;

/// A named, independently persisted collection of widgets plus its own
/// background and grid settings.
///
/// Serialized field names are camelCase so the stored JSON matches the
/// records written before and after migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    #[serde(default)]
    widgets: Vec<Widget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background: Option<BackgroundConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grid_settings: Option<GridSettings>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new empty workspace. The name is trimmed; an empty or
    /// over-long result is rejected.
    pub fn new(name: &str) -> Result<Self, WorkspaceCoreError> {
        let name = Self::validate_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: WorkspaceId::generate(),
            name,
            widgets: Vec::new(),
            background: None,
            grid_settings: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn validate_name(name: &str) -> Result<String, WorkspaceCoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceCoreError::NameCannotBeEmpty);
        }
        if name.len() > MAX_WORKSPACE_NAME_LENGTH {
            return Err(WorkspaceCoreError::NameTooLong {
                name: name.to_string(),
                max_len: MAX_WORKSPACE_NAME_LENGTH,
                actual_len: name.len(),
            });
        }
        Ok(name.to_string())
    }

    // Getters
    pub fn id(&self) -> &WorkspaceId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }
    pub fn background(&self) -> Option<&BackgroundConfig> {
        self.background.as_ref()
    }
    pub fn grid_settings(&self) -> Option<&GridSettings> {
        self.grid_settings.as_ref()
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutations. Each replaces the field as a whole and stamps `updated_at`.
    pub fn rename(&mut self, new_name: &str) -> Result<(), WorkspaceCoreError> {
        self.name = Self::validate_name(new_name)?;
        self.touch();
        Ok(())
    }

    pub fn set_widgets(&mut self, widgets: Vec<Widget>) {
        self.widgets = widgets;
        self.touch();
    }

    pub fn set_background(&mut self, background: Option<BackgroundConfig>) {
        self.background = background;
        self.touch();
    }

    pub fn set_grid_settings(&mut self, grid_settings: Option<GridSettings>) {
        self.grid_settings = grid_settings;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridSize;
    use pretty_assertions::assert_eq;

    #[test]
    fn workspace_new_valid() {
        let ws = Workspace::new("Main").unwrap();
        assert_eq!(ws.name(), "Main");
        assert!(ws.widgets().is_empty());
        assert!(ws.background().is_none());
        assert!(ws.grid_settings().is_none());
        assert_eq!(ws.created_at(), ws.updated_at());
    }

    #[test]
    fn workspace_new_trims_name() {
        let ws = Workspace::new("  Work  ").unwrap();
        assert_eq!(ws.name(), "Work");
    }

    #[test]
    fn workspace_new_name_empty() {
        assert!(matches!(
            Workspace::new("   "),
            Err(WorkspaceCoreError::NameCannotBeEmpty)
        ));
    }

    #[test]
    fn workspace_new_name_too_long() {
        let long_name = "a".repeat(MAX_WORKSPACE_NAME_LENGTH + 1);
        let result = Workspace::new(&long_name);
        assert!(matches!(
            result,
            Err(WorkspaceCoreError::NameTooLong { name, .. }) if name == long_name
        ));
    }

    #[test]
    fn workspace_rename_invalid_keeps_old_name() {
        let mut ws = Workspace::new("Old").unwrap();
        assert!(ws.rename("").is_err());
        assert_eq!(ws.name(), "Old");
    }

    #[test]
    fn mutations_bump_updated_at() {
        let mut ws = Workspace::new("Main").unwrap();
        let created = ws.updated_at();
        ws.set_widgets(vec![Widget::new(1, "Clock", GridSize::new(2, 2))]);
        assert!(ws.updated_at() >= created);
        assert_eq!(ws.widgets().len(), 1);

        let before = ws.updated_at();
        ws.set_grid_settings(Some(GridSettings::default()));
        assert!(ws.updated_at() >= before);
    }

    #[test]
    fn workspace_serde_camel_case() {
        let ws = Workspace::new("Serde Test").unwrap();
        let serialized = serde_json::to_string(&ws).unwrap();
        assert!(serialized.contains("\"createdAt\""));
        assert!(serialized.contains("\"updatedAt\""));
        assert!(!serialized.contains("\"gridSettings\"")); // skipped when None

        let deserialized: Workspace = serde_json::from_str(&serialized).unwrap();
        assert_eq!(ws, deserialized);
    }

    #[test]
    fn workspace_deserializes_record_without_optional_fields() {
        let raw = serde_json::json!({
            "id": "ws_1700000000000_abcdefghi",
            "name": "Main",
            "widgets": [],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        });
        let ws: Workspace = serde_json::from_value(raw).unwrap();
        assert_eq!(ws.name(), "Main");
        assert!(ws.background().is_none());
    }
}

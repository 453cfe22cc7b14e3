//! One-shot migration of flat legacy storage into the workspace model.
//!
//! Early versions persisted a single widget list, background, and grid
//! configuration under their own keys. This routine folds those into one
//! default workspace and marks the migration done so it never runs twice.

use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::layout::GridSettings;
use crate::storage::{Storage, StorageError};
use crate::widgets::{Widget, WIDGETS_KEY};
use crate::workspaces::core::{BackgroundConfig, Workspace};
use crate::workspaces::manager::errors::WorkspaceManagerError;
use crate::workspaces::manager::{ACTIVE_WORKSPACE_KEY, WORKSPACES_KEY};

/// Flag key recording that the migration has completed.
pub const MIGRATION_KEY: &str = "workspaces_migrated";
/// Pre-workspace storage key of the background configuration.
pub const LEGACY_BACKGROUND_KEY: &str = "background";
/// Pre-workspace storage key of the grid configuration.
pub const LEGACY_GRID_SETTINGS_KEY: &str = "grid_settings";

/// Reads a legacy record, tolerating values that no longer parse. Legacy
/// data was written by many old versions; a malformed record is dropped
/// rather than blocking startup.
async fn read_legacy<T: DeserializeOwned>(
    storage: &Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get(key).await {
        Ok(value) => Ok(value),
        Err(StorageError::Deserialization { key, source }) => {
            warn!("Discarding malformed legacy record '{}': {}", key, source);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Migrates legacy flat storage into the workspace list. Returns `true` when
/// a migration was performed, `false` when it was already done or storage
/// already holds workspaces.
pub async fn migrate_to_workspaces(storage: &Storage) -> Result<bool, WorkspaceManagerError> {
    let migrated: Option<bool> = storage.get(MIGRATION_KEY).await?;
    if migrated == Some(true) {
        return Ok(false);
    }

    let existing: Option<Vec<Workspace>> = read_legacy(storage, WORKSPACES_KEY).await?;
    if existing.as_ref().is_some_and(|list| !list.is_empty()) {
        // Workspaces already exist (written by a newer install); just stamp
        // the flag.
        storage.set(MIGRATION_KEY, &true).await?;
        return Ok(false);
    }

    info!("Migrating legacy flat storage to workspaces");
    let widgets: Option<Vec<Widget>> = read_legacy(storage, WIDGETS_KEY).await?;
    let background: Option<BackgroundConfig> =
        read_legacy(storage, LEGACY_BACKGROUND_KEY).await?;
    let grid_settings: Option<GridSettings> =
        read_legacy(storage, LEGACY_GRID_SETTINGS_KEY).await?;

    let mut workspace = Workspace::new("Main").map_err(WorkspaceManagerError::CoreError)?;
    if let Some(widgets) = widgets {
        workspace.set_widgets(widgets);
    }
    workspace.set_background(background);
    workspace.set_grid_settings(grid_settings);

    let id = workspace.id().clone();
    storage.set(WORKSPACES_KEY, &vec![workspace]).await?;
    storage.set(ACTIVE_WORKSPACE_KEY, &id).await?;
    storage.set(MIGRATION_KEY, &true).await?;
    info!("Legacy data migrated into default workspace {}", id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorageService;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn storage() -> (Storage, Arc<InMemoryStorageService>) {
        let backend = Arc::new(InMemoryStorageService::new());
        (Storage::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn migrates_legacy_records_into_default_workspace() {
        let (storage, backend) = storage();
        backend
            .seed(
                WIDGETS_KEY,
                json!([
                    {"id": 1, "type": "Clock", "position": {"x": 0, "y": 0},
                     "size": {"x": 4, "y": 2}, "props": {}, "theme": {}},
                    {"id": 2, "type": "Notes", "size": {"x": 5, "y": 3},
                     "props": {"text": "hi"}, "theme": {}}
                ]),
            )
            .await;
        backend
            .seed(
                LEGACY_BACKGROUND_KEY,
                json!({"mode": "Image", "values": {"url": "x.png"}}),
            )
            .await;
        backend
            .seed(
                LEGACY_GRID_SETTINGS_KEY,
                json!({"fullPage": true, "columns": 20, "spacing": 10}),
            )
            .await;

        assert!(migrate_to_workspaces(&storage).await.unwrap());

        let workspaces: Vec<Workspace> = storage.get(WORKSPACES_KEY).await.unwrap().unwrap();
        assert_eq!(workspaces.len(), 1);
        let main = &workspaces[0];
        assert_eq!(main.name(), "Main");
        assert_eq!(main.widgets().len(), 2);
        assert_eq!(main.widgets()[1].props["text"], json!("hi"));
        assert_eq!(main.background().unwrap().mode, "Image");
        assert_eq!(main.grid_settings().unwrap().columns, 20);

        let active: String = storage.get(ACTIVE_WORKSPACE_KEY).await.unwrap().unwrap();
        assert_eq!(active, main.id().as_str());
        let flag: bool = storage.get(MIGRATION_KEY).await.unwrap().unwrap();
        assert!(flag);
    }

    #[tokio::test]
    async fn running_twice_creates_exactly_one_workspace() {
        let (storage, backend) = storage();
        backend
            .seed(
                WIDGETS_KEY,
                json!([{"id": 1, "type": "Clock", "size": {"x": 4, "y": 2},
                        "props": {}, "theme": {}}]),
            )
            .await;

        assert!(migrate_to_workspaces(&storage).await.unwrap());
        assert!(!migrate_to_workspaces(&storage).await.unwrap());

        let workspaces: Vec<Workspace> = storage.get(WORKSPACES_KEY).await.unwrap().unwrap();
        assert_eq!(workspaces.len(), 1);
    }

    #[tokio::test]
    async fn fresh_install_gets_empty_default_workspace() {
        let (storage, _) = storage();
        assert!(migrate_to_workspaces(&storage).await.unwrap());

        let workspaces: Vec<Workspace> = storage.get(WORKSPACES_KEY).await.unwrap().unwrap();
        assert_eq!(workspaces.len(), 1);
        assert!(workspaces[0].widgets().is_empty());
        assert!(workspaces[0].background().is_none());
    }

    #[tokio::test]
    async fn existing_workspaces_only_get_flag_stamped() {
        let (storage, _) = storage();
        let existing = Workspace::new("Already here").unwrap();
        storage
            .set(WORKSPACES_KEY, &vec![existing.clone()])
            .await
            .unwrap();

        assert!(!migrate_to_workspaces(&storage).await.unwrap());

        let workspaces: Vec<Workspace> = storage.get(WORKSPACES_KEY).await.unwrap().unwrap();
        assert_eq!(workspaces, vec![existing]);
        let flag: bool = storage.get(MIGRATION_KEY).await.unwrap().unwrap();
        assert!(flag);
    }

    #[tokio::test]
    async fn malformed_legacy_record_is_dropped() {
        let (storage, backend) = storage();
        backend.seed(WIDGETS_KEY, json!("not a widget list")).await;

        assert!(migrate_to_workspaces(&storage).await.unwrap());
        let workspaces: Vec<Workspace> = storage.get(WORKSPACES_KEY).await.unwrap().unwrap();
        assert!(workspaces[0].widgets().is_empty());
    }
}

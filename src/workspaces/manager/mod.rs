//! Workspace store: owns the canonical workspace list and the
//! active-workspace pointer.
//!
//! Every mutating operation acquires the state lock, computes the next state
//! from the current in-memory state, persists the whole record, and then
//! publishes an event. Holding the lock across the storage write serializes
//! logical updates, so a rapid sequence of edits cannot lose an update to a
//! stale snapshot even though storage access suspends.

pub mod errors;
pub mod events;

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::{broadcast, Mutex};

use crate::storage::Storage;
use crate::widgets::{Widget, WidgetId};
use crate::workspaces::core::{BackgroundConfig, Workspace, WorkspaceId};
use crate::workspaces::migration;
use crate::layout::GridSettings;
use errors::WorkspaceManagerError;
use events::WorkspaceEvent;

/// Storage key of the ordered workspace list.
pub const WORKSPACES_KEY: &str = "workspaces";
/// Storage key of the active-workspace pointer.
pub const ACTIVE_WORKSPACE_KEY: &str = "activeWorkspaceId";

#[async_trait]
pub trait WorkspaceManagerService: Send + Sync {
    /// Runs the legacy migration, then loads workspaces and the active
    /// pointer from storage. Creates a default "Main" workspace when the
    /// stored list is empty or absent.
    async fn load_or_initialize(&self) -> Result<(), WorkspaceManagerError>;

    /// Appends a new workspace and makes it active.
    async fn create_workspace(&self, name: &str) -> Result<WorkspaceId, WorkspaceManagerError>;

    async fn rename_workspace(
        &self,
        id: &WorkspaceId,
        new_name: &str,
    ) -> Result<(), WorkspaceManagerError>;

    /// Removes a workspace. Refused on the last remaining workspace. If the
    /// deleted workspace was active, the first remaining workspace becomes
    /// active.
    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<(), WorkspaceManagerError>;

    /// Updates only the active-workspace pointer; workspace contents are
    /// untouched.
    async fn switch_workspace(&self, id: &WorkspaceId) -> Result<(), WorkspaceManagerError>;

    async fn update_widgets(
        &self,
        id: &WorkspaceId,
        widgets: Vec<Widget>,
    ) -> Result<(), WorkspaceManagerError>;

    async fn update_background(
        &self,
        id: &WorkspaceId,
        background: BackgroundConfig,
    ) -> Result<(), WorkspaceManagerError>;

    async fn update_grid_settings(
        &self,
        id: &WorkspaceId,
        grid_settings: GridSettings,
    ) -> Result<(), WorkspaceManagerError>;

    /// Deep-copies the widget out of the active workspace into the target
    /// workspace's list and removes it from the source. The copy loses its
    /// position so the target's placement pass re-places it.
    async fn move_widget_to_workspace(
        &self,
        widget_id: WidgetId,
        target_id: &WorkspaceId,
    ) -> Result<(), WorkspaceManagerError>;

    async fn workspaces(&self) -> Vec<Workspace>;
    async fn active_workspace(&self) -> Option<Workspace>;
    async fn active_workspace_id(&self) -> Option<WorkspaceId>;
    async fn is_loaded(&self) -> bool;

    fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent>;
}

#[derive(Default)]
struct WorkspaceManagerState {
    workspaces: Vec<Workspace>,
    active_workspace_id: Option<WorkspaceId>,
    loaded: bool,
}

impl WorkspaceManagerState {
    fn find_mut(
        &mut self,
        id: &WorkspaceId,
    ) -> Result<&mut Workspace, WorkspaceManagerError> {
        self.workspaces
            .iter_mut()
            .find(|ws| ws.id() == id)
            .ok_or_else(|| WorkspaceManagerError::WorkspaceNotFound(id.clone()))
    }

    fn contains(&self, id: &WorkspaceId) -> bool {
        self.workspaces.iter().any(|ws| ws.id() == id)
    }
}

#[derive(Clone)]
pub struct DefaultWorkspaceManager {
    storage: Storage,
    state: Arc<Mutex<WorkspaceManagerState>>,
    event_publisher: broadcast::Sender<WorkspaceEvent>,
}

impl DefaultWorkspaceManager {
    pub fn new(storage: Storage, broadcast_capacity: usize) -> Self {
        let (event_publisher, _) = broadcast::channel(broadcast_capacity);
        Self {
            storage,
            state: Arc::new(Mutex::new(WorkspaceManagerState::default())),
            event_publisher,
        }
    }

    async fn persist_workspaces(
        &self,
        state: &WorkspaceManagerState,
    ) -> Result<(), WorkspaceManagerError> {
        self.storage.set(WORKSPACES_KEY, &state.workspaces).await?;
        Ok(())
    }

    async fn persist_active(&self, id: &WorkspaceId) -> Result<(), WorkspaceManagerError> {
        self.storage.set(ACTIVE_WORKSPACE_KEY, id).await?;
        Ok(())
    }
}

#[async_trait]
impl WorkspaceManagerService for DefaultWorkspaceManager {
    async fn load_or_initialize(&self) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        info!("Loading or initializing workspaces");

        migration::migrate_to_workspaces(&self.storage).await?;

        let stored: Option<Vec<Workspace>> = self.storage.get(WORKSPACES_KEY).await?;
        match stored {
            Some(workspaces) if !workspaces.is_empty() => {
                let stored_active: Option<WorkspaceId> =
                    self.storage.get(ACTIVE_WORKSPACE_KEY).await?;
                let active_id = stored_active
                    .filter(|id| workspaces.iter().any(|ws| ws.id() == id))
                    .unwrap_or_else(|| workspaces[0].id().clone());
                info!(
                    "Loaded {} workspaces. Active: {}",
                    workspaces.len(),
                    active_id
                );
                state.workspaces = workspaces;
                state.active_workspace_id = Some(active_id);
            }
            _ => {
                // Should not happen after migration, but storage may have
                // been cleared externally.
                warn!("No stored workspaces after migration; creating default workspace");
                let workspace = Workspace::new("Main")?;
                let id = workspace.id().clone();
                state.workspaces = vec![workspace];
                state.active_workspace_id = Some(id.clone());
                self.persist_workspaces(&state).await?;
                self.persist_active(&id).await?;
            }
        }

        state.loaded = true;
        let ids: Vec<WorkspaceId> = state.workspaces.iter().map(|ws| ws.id().clone()).collect();
        if let Some(active_id) = &state.active_workspace_id {
            let _ = self.event_publisher.send(WorkspaceEvent::WorkspacesLoaded {
                ids,
                active_id: active_id.clone(),
            });
        }
        Ok(())
    }

    async fn create_workspace(&self, name: &str) -> Result<WorkspaceId, WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        let workspace = Workspace::new(name)?;
        let id = workspace.id().clone();
        let position = state.workspaces.len();
        info!("Creating workspace '{}' ({})", workspace.name(), id);

        state.workspaces.push(workspace);
        self.persist_workspaces(&state).await?;
        let _ = self.event_publisher.send(WorkspaceEvent::WorkspaceCreated {
            id: id.clone(),
            name: name.trim().to_string(),
            position,
        });

        let old_id = state.active_workspace_id.replace(id.clone());
        self.persist_active(&id).await?;
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::ActiveWorkspaceChanged {
                old_id,
                new_id: id.clone(),
            });
        Ok(id)
    }

    async fn rename_workspace(
        &self,
        id: &WorkspaceId,
        new_name: &str,
    ) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        let workspace = state.find_mut(id)?;
        let old_name = workspace.name().to_string();
        if old_name == new_name {
            return Ok(());
        }
        workspace.rename(new_name)?;
        let new_name = workspace.name().to_string();
        self.persist_workspaces(&state).await?;
        let _ = self.event_publisher.send(WorkspaceEvent::WorkspaceRenamed {
            id: id.clone(),
            old_name,
            new_name,
        });
        Ok(())
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        if state.workspaces.len() <= 1 {
            return Err(WorkspaceManagerError::CannotDeleteLastWorkspace);
        }
        let index = state
            .workspaces
            .iter()
            .position(|ws| ws.id() == id)
            .ok_or_else(|| WorkspaceManagerError::WorkspaceNotFound(id.clone()))?;

        info!("Deleting workspace {}", id);
        state.workspaces.remove(index);
        self.persist_workspaces(&state).await?;
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::WorkspaceDeleted { id: id.clone() });

        if state.active_workspace_id.as_ref() == Some(id) {
            let new_active = state.workspaces[0].id().clone();
            state.active_workspace_id = Some(new_active.clone());
            self.persist_active(&new_active).await?;
            let _ = self
                .event_publisher
                .send(WorkspaceEvent::ActiveWorkspaceChanged {
                    old_id: Some(id.clone()),
                    new_id: new_active,
                });
        }
        Ok(())
    }

    async fn switch_workspace(&self, id: &WorkspaceId) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        if !state.contains(id) {
            return Err(WorkspaceManagerError::WorkspaceNotFound(id.clone()));
        }
        if state.active_workspace_id.as_ref() == Some(id) {
            return Ok(());
        }
        debug!("Switching active workspace to {}", id);
        let old_id = state.active_workspace_id.replace(id.clone());
        self.persist_active(id).await?;
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::ActiveWorkspaceChanged {
                old_id,
                new_id: id.clone(),
            });
        Ok(())
    }

    async fn update_widgets(
        &self,
        id: &WorkspaceId,
        widgets: Vec<Widget>,
    ) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        let widget_count = widgets.len();
        state.find_mut(id)?.set_widgets(widgets);
        self.persist_workspaces(&state).await?;
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::WorkspaceWidgetsUpdated {
                id: id.clone(),
                widget_count,
            });
        Ok(())
    }

    async fn update_background(
        &self,
        id: &WorkspaceId,
        background: BackgroundConfig,
    ) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        state.find_mut(id)?.set_background(Some(background));
        self.persist_workspaces(&state).await?;
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::WorkspaceBackgroundChanged { id: id.clone() });
        Ok(())
    }

    async fn update_grid_settings(
        &self,
        id: &WorkspaceId,
        grid_settings: GridSettings,
    ) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        state
            .find_mut(id)?
            .set_grid_settings(Some(grid_settings.sanitized()));
        self.persist_workspaces(&state).await?;
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::WorkspaceGridSettingsChanged { id: id.clone() });
        Ok(())
    }

    async fn move_widget_to_workspace(
        &self,
        widget_id: WidgetId,
        target_id: &WorkspaceId,
    ) -> Result<(), WorkspaceManagerError> {
        let mut state = self.state.lock().await;
        let source_id = state
            .active_workspace_id
            .clone()
            .ok_or(WorkspaceManagerError::NoActiveWorkspace)?;
        if &source_id == target_id {
            return Ok(());
        }
        if !state.contains(target_id) {
            return Err(WorkspaceManagerError::WorkspaceNotFound(target_id.clone()));
        }

        let source = state.find_mut(&source_id)?;
        let mut copy = source
            .widgets()
            .iter()
            .find(|w| w.id == widget_id)
            .cloned()
            .ok_or(WorkspaceManagerError::WidgetNotFound(widget_id))?;
        // The copied position may collide in the target grid; clearing it
        // lets the target's placement pass find a free slot.
        copy.position = None;

        let remaining: Vec<Widget> = source
            .widgets()
            .iter()
            .filter(|w| w.id != widget_id)
            .cloned()
            .collect();
        source.set_widgets(remaining);

        let target = state.find_mut(target_id)?;
        let mut target_widgets = target.widgets().to_vec();
        target_widgets.push(copy);
        target.set_widgets(target_widgets);

        self.persist_workspaces(&state).await?;
        info!(
            "Moved widget {} from workspace {} to {}",
            widget_id, source_id, target_id
        );
        let _ = self
            .event_publisher
            .send(WorkspaceEvent::WidgetMovedToWorkspace {
                widget_id,
                source_id,
                target_id: target_id.clone(),
            });
        Ok(())
    }

    async fn workspaces(&self) -> Vec<Workspace> {
        self.state.lock().await.workspaces.clone()
    }

    async fn active_workspace(&self) -> Option<Workspace> {
        let state = self.state.lock().await;
        let active = state
            .active_workspace_id
            .as_ref()
            .and_then(|id| state.workspaces.iter().find(|ws| ws.id() == id));
        // Fall back to the first workspace if the pointer is dangling.
        active.or_else(|| state.workspaces.first()).cloned()
    }

    async fn active_workspace_id(&self) -> Option<WorkspaceId> {
        self.state.lock().await.active_workspace_id.clone()
    }

    async fn is_loaded(&self) -> bool {
        self.state.lock().await.loaded
    }

    fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent> {
        self.event_publisher.subscribe()
    }
}

//! Glue between the per-session widget manager and the workspace store.
//!
//! Activating a workspace loads its widget list into the widget manager and
//! installs a save strategy that routes every subsequent save into that
//! workspace's record. The previous strategy is handed back so the caller
//! can restore it when the association ends.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::widgets::{Widget, WidgetManager, WidgetManagerError, WidgetSaveStrategy};
use crate::workspaces::core::{Workspace, WorkspaceId};
use crate::workspaces::manager::WorkspaceManagerService;

/// Save strategy that persists the widget list into one workspace through
/// the workspace manager, so the write participates in its update
/// serialization.
pub struct WorkspaceBoundSaveStrategy {
    manager: Arc<dyn WorkspaceManagerService>,
    workspace_id: WorkspaceId,
}

impl WorkspaceBoundSaveStrategy {
    pub fn new(manager: Arc<dyn WorkspaceManagerService>, workspace_id: WorkspaceId) -> Self {
        Self {
            manager,
            workspace_id,
        }
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }
}

#[async_trait]
impl WidgetSaveStrategy for WorkspaceBoundSaveStrategy {
    async fn persist(&self, widgets: &[Widget]) -> Result<(), WidgetManagerError> {
        self.manager
            .update_widgets(&self.workspace_id, widgets.to_vec())
            .await
            .map_err(|err| WidgetManagerError::Persistence(Box::new(err)))
    }
}

/// Points the widget manager at `workspace`: installs a workspace-bound save
/// strategy and loads the workspace's widgets as the working list. Returns
/// the previously installed strategy for restoration.
pub async fn activate_workspace_session(
    widget_manager: &mut WidgetManager,
    workspace_manager: Arc<dyn WorkspaceManagerService>,
    workspace: &Workspace,
) -> Arc<dyn WidgetSaveStrategy> {
    debug!(
        "Binding widget manager to workspace {} ({} widgets)",
        workspace.id(),
        workspace.widgets().len()
    );
    let strategy = Arc::new(WorkspaceBoundSaveStrategy::new(
        workspace_manager,
        workspace.id().clone(),
    ));
    let previous = widget_manager.set_save_strategy(strategy);
    widget_manager.load_from(workspace.widgets()).await;
    previous
}

use serde::{Deserialize, Serialize};

use crate::widgets::WidgetId;
use crate::workspaces::core::WorkspaceId;

/// Change notifications published by the workspace manager on its broadcast
/// channel. Consumers (UI shells, diagnostics) react to state they did not
/// change themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkspaceEvent {
    WorkspacesLoaded {
        ids: Vec<WorkspaceId>,
        active_id: WorkspaceId,
    },
    WorkspaceCreated {
        id: WorkspaceId,
        name: String,
        position: usize,
    },
    WorkspaceDeleted {
        id: WorkspaceId,
    },
    WorkspaceRenamed {
        id: WorkspaceId,
        old_name: String,
        new_name: String,
    },
    ActiveWorkspaceChanged {
        old_id: Option<WorkspaceId>,
        new_id: WorkspaceId,
    },
    WorkspaceWidgetsUpdated {
        id: WorkspaceId,
        widget_count: usize,
    },
    WorkspaceBackgroundChanged {
        id: WorkspaceId,
    },
    WorkspaceGridSettingsChanged {
        id: WorkspaceId,
    },
    WidgetMovedToWorkspace {
        widget_id: WidgetId,
        source_id: WorkspaceId,
        target_id: WorkspaceId,
    },
}

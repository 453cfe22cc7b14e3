use thiserror::Error;

use crate::storage::StorageError;
use crate::widgets::WidgetId;
use crate::workspaces::core::{WorkspaceCoreError, WorkspaceId};

#[derive(Error, Debug)]
pub enum WorkspaceManagerError {
    #[error("Workspace with ID '{0}' not found.")]
    WorkspaceNotFound(WorkspaceId),

    #[error("Cannot delete the last workspace.")]
    CannotDeleteLastWorkspace,

    #[error("No active workspace is currently set.")]
    NoActiveWorkspace,

    #[error("Widget with ID '{0}' not found in the active workspace.")]
    WidgetNotFound(WidgetId),

    #[error("Workspace core error: {0}")]
    CoreError(#[from] WorkspaceCoreError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

use thiserror::Error;

use crate::storage::StorageError;
use crate::widgets::WidgetManagerError;
use crate::workspaces::{WorkspaceCoreError, WorkspaceManagerError};

/// Umbrella error for callers that interact with several subsystems and do
/// not need to distinguish their failure sources.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    WorkspaceCore(#[from] WorkspaceCoreError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceManagerError),

    #[error(transparent)]
    Widget(#[from] WidgetManagerError),
}

pub type DomainResult<T> = Result<T, DomainError>;

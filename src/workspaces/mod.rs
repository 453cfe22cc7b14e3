//! Workspace model: named widget collections, the workspace store, the
//! legacy-storage migration, and the session glue that binds the widget
//! manager to the active workspace.

pub mod core;
pub mod manager;
pub mod migration;
pub mod session;

pub use core::{BackgroundConfig, Workspace, WorkspaceCoreError, WorkspaceId};
pub use manager::errors::WorkspaceManagerError;
pub use manager::events::WorkspaceEvent;
pub use manager::{
    DefaultWorkspaceManager, WorkspaceManagerService, ACTIVE_WORKSPACE_KEY, WORKSPACES_KEY,
};
pub use migration::{migrate_to_workspaces, MIGRATION_KEY};
pub use session::{activate_workspace_session, WorkspaceBoundSaveStrategy};

pub mod errors;
pub mod types;
pub mod workspace;

pub use errors::{WorkspaceCoreError, MAX_WORKSPACE_NAME_LENGTH};
pub use types::{BackgroundConfig, WorkspaceId};
pub use workspace::Workspace;

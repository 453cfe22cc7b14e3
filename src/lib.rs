//! Domain layer of the TabDeck dashboard: widget grid layout, the widget
//! collection manager, and multi-workspace state with persistence.
//!
//! The crate is UI-agnostic. It talks to the outside world through two
//! seams: the [`storage::StorageService`] port for persistence and the
//! [`widgets::WidgetTypeRegistry`] port for widget-type defaults. Rendering
//! collaborators consume the [`workspaces::WorkspaceManagerService`] trait
//! and its broadcast events.
//!
//! # Initialization
//!
//! [`initialize`] wires the default workspace manager to a storage backend,
//! runs the legacy migration, and loads or creates the workspace list:
//!
//! ```no_run
//! use std::sync::Arc;
//! use tabdeck_domain::storage::{InMemoryStorageService, Storage};
//! use tabdeck_domain::workspaces::WorkspaceManagerService;
//!
//! # async fn run() -> tabdeck_domain::error::DomainResult<()> {
//! let storage = Storage::new(Arc::new(InMemoryStorageService::new()));
//! let manager = tabdeck_domain::initialize(storage).await?;
//! let active = manager.active_workspace().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod layout;
pub mod storage;
pub mod widgets;
pub mod workspaces;

use std::sync::Arc;

use error::DomainResult;
use storage::Storage;
use workspaces::{DefaultWorkspaceManager, WorkspaceManagerService};

pub use error::{DomainError, DomainResult as Result};

/// Broadcast channel capacity of the workspace manager created by
/// [`initialize`]. Slow consumers lag rather than block publishers.
pub const DEFAULT_EVENT_CAPACITY: usize = 32;

/// Creates the workspace manager on `storage` and brings it to the loaded
/// state: legacy data migrated, workspaces read, active pointer validated.
pub async fn initialize(storage: Storage) -> DomainResult<Arc<DefaultWorkspaceManager>> {
    let manager = Arc::new(DefaultWorkspaceManager::new(storage, DEFAULT_EVENT_CAPACITY));
    manager.load_or_initialize().await?;
    Ok(manager)
}

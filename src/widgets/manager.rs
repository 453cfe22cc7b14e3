//! Widget collection manager.
//!
//! Owns the live, mutable widget list of the session that is currently on
//! screen. The list is always a working copy: loading replaces it with a
//! clone of the source, so edits never alias a workspace's canonical list.
//! Where the list is persisted is decided by the injected save strategy,
//! which lets one generic widget list be shared by many workspaces without
//! the manager knowing about workspaces.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::errors::WidgetManagerError;
use super::registry::WidgetTypeRegistry;
use super::types::{Widget, WidgetId};
use crate::storage::Storage;

/// Storage key of the pre-workspace flat widget list. Still the default
/// persistence target when no workspace-bound strategy is installed.
pub const WIDGETS_KEY: &str = "widgets";

/// Destination for the widget list on save. Every mutating manager
/// operation ends by invoking the current strategy; failures propagate to
/// the caller without retry.
#[async_trait]
pub trait WidgetSaveStrategy: Send + Sync {
    async fn persist(&self, widgets: &[Widget]) -> Result<(), WidgetManagerError>;
}

/// Default strategy: writes the whole widget list under a fixed storage key.
pub struct StorageKeySaveStrategy {
    storage: Storage,
    key: String,
}

impl StorageKeySaveStrategy {
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

#[async_trait]
impl WidgetSaveStrategy for StorageKeySaveStrategy {
    async fn persist(&self, widgets: &[Widget]) -> Result<(), WidgetManagerError> {
        self.storage.set(&self.key, widgets).await?;
        Ok(())
    }
}

pub struct WidgetManager {
    widgets: Vec<Widget>,
    next_id: WidgetId,
    registry: Arc<dyn WidgetTypeRegistry>,
    save_strategy: Arc<dyn WidgetSaveStrategy>,
}

impl WidgetManager {
    pub fn new(
        registry: Arc<dyn WidgetTypeRegistry>,
        save_strategy: Arc<dyn WidgetSaveStrategy>,
    ) -> Self {
        Self {
            widgets: Vec::new(),
            next_id: 1,
            registry,
            save_strategy,
        }
    }

    /// The live widget list, read by the rendering collaborator.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Mutable access for the rendering collaborator to report drag/resize
    /// deltas back as position/size updates. The caller is expected to
    /// follow up with [`save`](Self::save).
    pub fn widgets_mut(&mut self) -> &mut Vec<Widget> {
        &mut self.widgets
    }

    /// Installs a new save strategy and returns the previous one. Only one
    /// strategy is active at a time; a session that swaps the strategy must
    /// restore the returned value when the association ends, or subsequent
    /// saves will be misrouted.
    pub fn set_save_strategy(
        &mut self,
        strategy: Arc<dyn WidgetSaveStrategy>,
    ) -> Arc<dyn WidgetSaveStrategy> {
        std::mem::replace(&mut self.save_strategy, strategy)
    }

    /// Replaces the working list with a copy of `source` and runs the
    /// registry's `after_load` hook on each widget. The source list is never
    /// held by reference, so later edits cannot bleed across workspaces.
    pub async fn load_from(&mut self, source: &[Widget]) {
        debug!("Loading {} widgets into the widget manager", source.len());
        self.widgets = source.to_vec();
        self.next_id = self.widgets.iter().map(|w| w.id + 1).max().unwrap_or(1);

        let registry = Arc::clone(&self.registry);
        for widget in &mut self.widgets {
            registry.after_load(widget).await;
        }
    }

    /// Appends a new widget of `kind` with a fresh ID, no position (the
    /// resolver places it on the next layout pass), and the registry's
    /// creation defaults. Persists the list.
    pub async fn create_widget(&mut self, kind: &str) -> Result<WidgetId, WidgetManagerError> {
        let id = self.next_id;
        self.next_id += 1;

        let mut widget = Widget::new(id, kind, self.registry.initial_size(kind));
        widget.props = self.registry.initial_props(kind);
        debug!("Created widget {} of kind '{}'", id, kind);
        self.widgets.push(widget);
        self.save().await?;
        Ok(id)
    }

    /// Removes the widget with `id` and persists the list.
    pub async fn remove_widget(&mut self, id: WidgetId) -> Result<(), WidgetManagerError> {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        if self.widgets.len() == before {
            return Err(WidgetManagerError::WidgetNotFound(id));
        }
        debug!("Removed widget {}", id);
        self.save().await
    }

    /// Inserts a deep copy of the widget with `id`, under a fresh ID and
    /// with no position, and persists the list.
    pub async fn duplicate_widget(&mut self, id: WidgetId) -> Result<WidgetId, WidgetManagerError> {
        let source = self
            .widgets
            .iter()
            .find(|w| w.id == id)
            .ok_or(WidgetManagerError::WidgetNotFound(id))?;

        let mut copy = source.clone();
        copy.id = self.next_id;
        self.next_id += 1;
        copy.position = None;
        let new_id = copy.id;

        debug!("Duplicated widget {} as {}", id, new_id);
        self.widgets.push(copy);
        self.save().await?;
        Ok(new_id)
    }

    /// Persists the whole widget list through the current save strategy.
    pub async fn save(&self) -> Result<(), WidgetManagerError> {
        debug!("Persisting {} widgets", self.widgets.len());
        self.save_strategy.persist(&self.widgets).await
    }
}

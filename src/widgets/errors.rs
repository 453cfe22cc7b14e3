use thiserror::Error;

use super::types::WidgetId;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum WidgetManagerError {
    #[error("Widget with ID '{0}' not found.")]
    WidgetNotFound(WidgetId),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to persist widget list: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

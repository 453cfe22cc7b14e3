use std::fmt;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::widgets::JsonMap;

/// Globally unique, opaque workspace identifier.
///
/// Generated as `ws_<unix-millis>_<random suffix>`, matching the identifiers
/// already present in stored data. The format carries no meaning beyond
/// uniqueness; everything else treats the ID as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn generate() -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(|c| (c as char).to_ascii_lowercase())
            .collect();
        Self(format!("ws_{}_{}", Utc::now().timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkspaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WorkspaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Background configuration of one workspace. Opaque to the domain: the
/// `values` mapping is keyed by `mode` and interpreted only by the rendering
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub mode: String,
    #[serde(default)]
    pub values: JsonMap,
}

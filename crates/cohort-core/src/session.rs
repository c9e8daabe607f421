use crate::error::Result;
use crate::paths;
use crate::store::{self, DocState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Persisted record for one roster identifier. Single-writer: only the
/// session itself mutates its record, so no sidecar lock is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    /// Informational cache of this session's claims; the lock table is
    /// authoritative.
    #[serde(default)]
    pub locked_files: Vec<String>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            started_at: now,
            last_active: now,
            current_task: None,
            locked_files: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    pub fn cache_lock(&mut self, path: &str) {
        if !self.locked_files.iter().any(|p| p == path) {
            self.locked_files.push(path.to_string());
        }
        self.last_active = Utc::now();
    }

    pub fn uncache_lock(&mut self, path: &str) {
        self.locked_files.retain(|p| p != path);
        self.last_active = Utc::now();
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Load the record for `id`, or `None` if the session was never started.
    pub fn load(root: &Path, id: &str) -> Result<Option<Self>> {
        match store::read_doc(&paths::session_path(root, id))? {
            DocState::Present(s) => Ok(Some(s)),
            DocState::Absent => Ok(None),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        store::write_doc(&paths::session_path(root, &self.id), self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

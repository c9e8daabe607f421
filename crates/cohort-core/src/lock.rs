use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LockEntry
// ---------------------------------------------------------------------------

/// Advisory exclusive claim of intent to edit one file. Cooperative:
/// enforcement depends on every session checking before editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockEntry {
    pub path: String,
    pub session: String,
    pub locked_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// LockTable
// ---------------------------------------------------------------------------

/// The shared table of claims. Invariant: at most one entry per path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockTable {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<LockEntry>,
}

fn default_version() -> u32 {
    1
}

/// Outcome of a claim attempt, before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// New entry inserted for the claiming session.
    Claimed,
    /// The claiming session already holds the path; table unchanged.
    AlreadyOwn,
    /// Another session holds the path; table unchanged.
    HeldByOther,
}

impl ClaimOutcome {
    pub fn acquired(self) -> bool {
        matches!(self, ClaimOutcome::Claimed | ClaimOutcome::AlreadyOwn)
    }
}

impl LockTable {
    pub fn entry_for(&self, path: &str) -> Option<&LockEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Try to claim `path` for `session`.
    pub fn claim(&mut self, path: &str, session: &str) -> ClaimOutcome {
        match self.entry_for(path) {
            Some(e) if e.session == session => ClaimOutcome::AlreadyOwn,
            Some(_) => ClaimOutcome::HeldByOther,
            None => {
                self.entries.push(LockEntry {
                    path: path.to_string(),
                    session: session.to_string(),
                    locked_at: Utc::now(),
                });
                ClaimOutcome::Claimed
            }
        }
    }

    /// Remove the entry for `path` only if `session` owns it. Returns
    /// whether an entry was removed. A non-owner release leaves the table
    /// unchanged so a confused session cannot evict another's claim.
    pub fn release_owned(&mut self, path: &str, session: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.path == path && e.session == session));
        self.entries.len() != before
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Process-scoped facade over the session registry, lock table, and
//! discovery log.
//!
//! One `Coordinator` per process holds the persistence root and the
//! process-local active-session pointer. The pointer is never persisted or
//! shared across processes; each assistant process carries its own.

use crate::config::Config;
use crate::discovery::{Discovery, DiscoveryLog};
use crate::error::{CoordError, Result};
use crate::lock::{ClaimOutcome, LockEntry, LockTable};
use crate::paths;
use crate::session::Session;
use crate::store;
use crate::types::DiscoveryKind;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SyncView
// ---------------------------------------------------------------------------

/// Snapshot of shared state as of one poll: every current lock claim, plus
/// the discoveries authored by sessions other than the requester. Derived
/// on demand, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SyncView {
    pub locks: Vec<LockEntry>,
    pub discoveries: Vec<Discovery>,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Coordinator {
    root: PathBuf,
    active: Option<String>,
}

impl Coordinator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-point all persistence paths at a new root, e.g. after a working
    /// directory change. Existing data is not migrated, and the active
    /// session pointer is cleared since it refers to the old root's records.
    pub fn rebase(&mut self, new_root: impl Into<PathBuf>) {
        self.root = new_root.into();
        self.active = None;
    }

    // ---------------------------------------------------------------------------
    // Session registry
    // ---------------------------------------------------------------------------

    /// Start (or reset) the session for `id` and make it this process's
    /// active session. Starting an id that already has a record discards
    /// its prior task and lock cache; this is an explicit reset.
    pub fn start(&mut self, id: &str) -> Result<Session> {
        Config::load(&self.root)?.require_member(id)?;
        let session = Session::new(id);
        session.save(&self.root)?;
        self.active = Some(id.to_string());
        tracing::debug!("started session '{id}'");
        Ok(session)
    }

    /// Records for every roster identifier that has one, in roster order.
    /// Identifiers never started are silently omitted.
    pub fn status(&self) -> Result<Vec<Session>> {
        let config = Config::load(&self.root)?;
        let mut sessions = Vec::new();
        for id in &config.roster {
            if let Some(session) = Session::load(&self.root, id)? {
                sessions.push(session);
            }
        }
        Ok(sessions)
    }

    /// Make an already-started session this process's active session,
    /// refreshing its `last_active` stamp.
    pub fn switch(&mut self, id: &str) -> Result<Session> {
        Config::load(&self.root)?.require_member(id)?;
        let mut session = Session::load(&self.root, id)?
            .ok_or_else(|| CoordError::SessionNotFound(id.to_string()))?;
        session.touch();
        session.save(&self.root)?;
        self.active = Some(id.to_string());
        Ok(session)
    }

    pub fn current_session(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Record what the active session is working on.
    pub fn set_task(&self, task: &str) -> Result<Session> {
        let id = self.require_active()?;
        let mut session = Session::load(&self.root, id)?
            .ok_or_else(|| CoordError::SessionNotFound(id.to_string()))?;
        session.current_task = Some(task.to_string());
        session.touch();
        session.save(&self.root)?;
        Ok(session)
    }

    fn require_active(&self) -> Result<&str> {
        self.active.as_deref().ok_or(CoordError::NoActiveSession)
    }

    // ---------------------------------------------------------------------------
    // Lock table
    // ---------------------------------------------------------------------------

    /// Claim `path` for the active session. Returns `false` when another
    /// session holds it, `true` on a fresh claim or an idempotent re-claim.
    /// The whole read-check-write cycle runs under the table's sidecar
    /// lock, so two sessions claiming concurrently cannot lose entries.
    pub fn acquire(&self, path: &str) -> Result<bool> {
        let session = self.require_active()?;
        let outcome = store::update_doc(&paths::locks_path(&self.root), |table: &mut LockTable| {
            table.claim(path, session)
        })?;
        match outcome {
            ClaimOutcome::Claimed => self.cache_lock(session, path, true)?,
            ClaimOutcome::AlreadyOwn => {}
            ClaimOutcome::HeldByOther => {
                tracing::debug!("lock on '{path}' held by another session");
            }
        }
        Ok(outcome.acquired())
    }

    /// Release the active session's claim on `path`. Best-effort: a no-op
    /// when no session is active, when the path is unclaimed, or when the
    /// claim belongs to a different session.
    pub fn release(&self, path: &str) -> Result<()> {
        let Some(session) = self.active.as_deref() else {
            return Ok(());
        };
        let removed = store::update_doc(&paths::locks_path(&self.root), |table: &mut LockTable| {
            table.release_owned(path, session)
        })?;
        if removed {
            self.cache_lock(session, path, false)?;
        }
        Ok(())
    }

    /// The full current lock table, empty when nothing was ever locked.
    pub fn locks(&self) -> Result<Vec<LockEntry>> {
        let table: LockTable =
            store::read_doc(&paths::locks_path(&self.root))?.unwrap_or_default();
        Ok(table.entries)
    }

    /// Mirror a claim change onto the session record's informational cache.
    fn cache_lock(&self, id: &str, path: &str, held: bool) -> Result<()> {
        if let Some(mut session) = Session::load(&self.root, id)? {
            if held {
                session.cache_lock(path);
            } else {
                session.uncache_lock(path);
            }
            session.save(&self.root)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Discovery log
    // ---------------------------------------------------------------------------

    /// Append a note from the active session. Entries are immutable and
    /// keep append order; concurrent appends both survive thanks to the
    /// sidecar lock held for the rewrite.
    pub fn append(&self, kind: DiscoveryKind, content: &str) -> Result<()> {
        let session = self.require_active()?;
        store::update_doc(&paths::discoveries_path(&self.root), |log: &mut DiscoveryLog| {
            log.append(session, kind, content)
        })
    }

    /// The discovery log in append order, optionally without one author's
    /// entries. Empty when nothing was ever recorded.
    pub fn list(&self, exclude_session: Option<&str>) -> Result<Vec<Discovery>> {
        let log: DiscoveryLog =
            store::read_doc(&paths::discoveries_path(&self.root))?.unwrap_or_default();
        Ok(log.listed(exclude_session))
    }

    // ---------------------------------------------------------------------------
    // Sync
    // ---------------------------------------------------------------------------

    /// The single call a session polls to learn what others have done:
    /// every lock claim, plus discoveries it did not author itself.
    /// Read-only; degrades to empty collections on a fresh checkout.
    pub fn sync(&self) -> Result<SyncView> {
        Ok(SyncView {
            locks: self.locks()?,
            discoveries: self.list(self.current_session())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use crate::error::{CoordError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const COHORT_DIR: &str = ".cohort";
pub const SESSIONS_DIR: &str = ".cohort/sessions";

pub const CONFIG_FILE: &str = ".cohort/config.yaml";
pub const LOCKS_FILE: &str = ".cohort/locks.yaml";
pub const DISCOVERIES_FILE: &str = ".cohort/discoveries.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn cohort_dir(root: &Path) -> PathBuf {
    root.join(COHORT_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn locks_path(root: &Path) -> PathBuf {
    root.join(LOCKS_FILE)
}

pub fn discoveries_path(root: &Path) -> PathBuf {
    root.join(DISCOVERIES_FILE)
}

pub fn sessions_dir(root: &Path) -> PathBuf {
    root.join(SESSIONS_DIR)
}

pub fn session_path(root: &Path, id: &str) -> PathBuf {
    sessions_dir(root).join(format!("{id}.yaml"))
}

/// Sidecar lock file guarding read-modify-write cycles on a shared document.
pub fn sidecar_lock_path(doc: &Path) -> PathBuf {
    let mut name = doc
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".lock");
    doc.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Session id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_session_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 32 || !id_re().is_match(id) {
        return Err(CoordError::InvalidSessionId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use crate::error::{CoordError, Result};
use crate::paths;
use crate::store::{self, DocState};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project-level coordination config. The roster is the validated set of
/// session identifiers allowed to coordinate in this checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
}

fn default_version() -> u32 {
    1
}

fn default_roster() -> Vec<String> {
    vec![
        "alpha".to_string(),
        "beta".to_string(),
        "gamma".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            roster: default_roster(),
        }
    }
}

impl Config {
    pub fn with_roster(roster: Vec<String>) -> Result<Self> {
        for id in &roster {
            paths::validate_session_id(id)?;
        }
        Ok(Self {
            version: default_version(),
            roster,
        })
    }

    /// Load the config, falling back to the default roster when no config
    /// file has been written yet.
    pub fn load(root: &Path) -> Result<Self> {
        match store::read_doc(&paths::config_path(root))? {
            DocState::Present(cfg) => Ok(cfg),
            DocState::Absent => Ok(Self::default()),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        store::write_doc(&paths::config_path(root), self)
    }

    /// Reject identifiers outside the roster before any record is created.
    pub fn require_member(&self, id: &str) -> Result<()> {
        paths::validate_session_id(id)?;
        if !self.roster.iter().any(|r| r == id) {
            return Err(CoordError::UnknownSession {
                id: id.to_string(),
                roster: self.roster.join(", "),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_roster_when_absent() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.roster, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn roster_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::with_roster(vec!["amy".to_string(), "ben".to_string()]).unwrap();
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.roster, vec!["amy", "ben"]);
    }

    #[test]
    fn with_roster_validates_ids() {
        assert!(Config::with_roster(vec!["Not Valid".to_string()]).is_err());
    }

    #[test]
    fn require_member_rejects_outsiders() {
        let cfg = Config::default();
        assert!(cfg.require_member("alpha").is_ok());
        assert!(matches!(
            cfg.require_member("delta"),
            Err(CoordError::UnknownSession { .. })
        ));
    }
}

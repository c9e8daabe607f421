use crate::types::DiscoveryKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// One immutable, timestamped note shared across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discovery {
    pub session: String,
    pub timestamp: DateTime<Utc>,
    pub kind: DiscoveryKind,
    pub content: String,
}

// ---------------------------------------------------------------------------
// DiscoveryLog
// ---------------------------------------------------------------------------

/// Append-only shared log. No update or delete exists by design; entries
/// keep their append order forever.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryLog {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<Discovery>,
}

fn default_version() -> u32 {
    1
}

impl DiscoveryLog {
    pub fn append(&mut self, session: &str, kind: DiscoveryKind, content: impl Into<String>) {
        self.entries.push(Discovery {
            session: session.to_string(),
            timestamp: Utc::now(),
            kind,
            content: content.into(),
        });
    }

    /// Entries in append order, optionally without one author's own items
    /// (a session polling for what is new to it excludes itself).
    pub fn listed(&self, exclude_session: Option<&str>) -> Vec<Discovery> {
        self.entries
            .iter()
            .filter(|d| exclude_session.map_or(true, |s| d.session != s))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut log = DiscoveryLog::default();
        log.append("alpha", DiscoveryKind::Finding, "first");
        log.append("beta", DiscoveryKind::Decision, "second");
        log.append("alpha", DiscoveryKind::Blocker, "third");
        let contents: Vec<_> = log.entries.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn listed_without_filter_returns_all() {
        let mut log = DiscoveryLog::default();
        log.append("alpha", DiscoveryKind::Finding, "one");
        log.append("beta", DiscoveryKind::Finding, "two");
        assert_eq!(log.listed(None).len(), 2);
    }

    #[test]
    fn listed_excludes_author_and_keeps_order() {
        let mut log = DiscoveryLog::default();
        log.append("alpha", DiscoveryKind::Finding, "a1");
        log.append("beta", DiscoveryKind::Decision, "b1");
        log.append("alpha", DiscoveryKind::Blocker, "a2");
        log.append("beta", DiscoveryKind::Finding, "b2");

        let seen_by_alpha = log.listed(Some("alpha"));
        let contents: Vec<_> = seen_by_alpha.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["b1", "b2"]);
    }
}

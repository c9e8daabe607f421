use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DiscoveryKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryKind {
    Finding,
    Decision,
    Blocker,
}

impl DiscoveryKind {
    pub fn all() -> &'static [DiscoveryKind] {
        &[
            DiscoveryKind::Finding,
            DiscoveryKind::Decision,
            DiscoveryKind::Blocker,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiscoveryKind::Finding => "finding",
            DiscoveryKind::Decision => "decision",
            DiscoveryKind::Blocker => "blocker",
        }
    }
}

impl fmt::Display for DiscoveryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiscoveryKind {
    type Err = crate::error::CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finding" => Ok(DiscoveryKind::Finding),
            "decision" => Ok(DiscoveryKind::Decision),
            "blocker" => Ok(DiscoveryKind::Blocker),
            _ => Err(crate::error::CoordError::InvalidDiscoveryKind(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

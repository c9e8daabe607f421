use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordError {
    #[error("session '{0}' has not been started: run 'cohort session start {0}' first")]
    SessionNotFound(String),

    #[error("no active session: start or switch to a session before locking files or recording discoveries")]
    NoActiveSession,

    #[error("unknown session '{id}': the roster is [{roster}]")]
    UnknownSession { id: String, roster: String },

    #[error("invalid session id '{0}': must be lowercase alphanumeric with hyphens, at most 32 chars")]
    InvalidSessionId(String),

    #[error("invalid discovery kind: {0}")]
    InvalidDiscoveryKind(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CoordError>;

pub mod discovery;
pub mod init;
pub mod lock;
pub mod session;
pub mod sync;

use anyhow::Context;
use cohort_core::Coordinator;
use std::path::Path;

/// Coordinator bound to the acting session, which must be supplied and
/// already started. Binding goes through `switch` so an unknown or
/// never-started id surfaces as a hard error with its remediation hint.
pub fn bind(root: &Path, session: Option<&str>) -> anyhow::Result<Coordinator> {
    let id = session.context("no acting session: pass --session <id> or set COHORT_SESSION")?;
    let mut coord = Coordinator::new(root);
    coord.switch(id)?;
    Ok(coord)
}

/// Coordinator bound to the acting session when one is supplied and
/// started, unbound otherwise. Used by best-effort and read-only commands.
pub fn bind_if_possible(root: &Path, session: Option<&str>) -> Coordinator {
    let mut coord = Coordinator::new(root);
    if let Some(id) = session {
        if coord.switch(id).is_err() {
            tracing::warn!("session '{id}' is not started; continuing unbound");
        }
    }
    coord
}

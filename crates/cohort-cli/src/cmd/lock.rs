use crate::output::{print_json, print_table};
use clap::Subcommand;
use cohort_core::Coordinator;
use std::path::Path;

#[derive(Subcommand)]
pub enum LockSubcommand {
    /// Claim a file for the acting session (fails when another holds it)
    Acquire { path: String },
    /// Release the acting session's claim (no-op if not the owner)
    Release { path: String },
    /// Show every current claim
    List,
}

pub fn run(
    root: &Path,
    session: Option<&str>,
    subcmd: LockSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        LockSubcommand::Acquire { path } => acquire(root, session, &path, json),
        LockSubcommand::Release { path } => release(root, session, &path, json),
        LockSubcommand::List => list(root, json),
    }
}

fn acquire(root: &Path, session: Option<&str>, path: &str, json: bool) -> anyhow::Result<()> {
    let coord = super::bind(root, session)?;
    if !coord.acquire(path)? {
        let holder = coord
            .locks()?
            .into_iter()
            .find(|e| e.path == path)
            .map(|e| e.session)
            .unwrap_or_else(|| "another session".to_string());
        anyhow::bail!("'{path}' is locked by {holder}");
    }
    if json {
        print_json(&serde_json::json!({
            "path": path,
            "session": coord.current_session(),
            "acquired": true,
        }))?;
    } else {
        println!("locked '{path}'");
    }
    Ok(())
}

fn release(root: &Path, session: Option<&str>, path: &str, json: bool) -> anyhow::Result<()> {
    // Best-effort by design: no acting session means nothing to release.
    let coord = super::bind_if_possible(root, session);
    coord.release(path)?;
    if json {
        print_json(&serde_json::json!({ "path": path, "released": true }))?;
    } else {
        println!("released '{path}'");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let coord = Coordinator::new(root);
    let locks = coord.locks()?;
    if json {
        return print_json(&locks);
    }
    if locks.is_empty() {
        println!("no locks held");
        return Ok(());
    }
    let rows = locks
        .iter()
        .map(|e| {
            vec![
                e.path.clone(),
                e.session.clone(),
                e.locked_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();
    print_table(&["PATH", "SESSION", "LOCKED AT"], rows);
    Ok(())
}

use crate::output::print_json;
use cohort_core::config::Config;
use cohort_core::{io, paths};
use std::path::Path;

/// Create `.cohort/` and its config. Idempotent: an existing config is
/// left alone unless a roster is explicitly given, and runtime documents
/// are never touched.
pub fn run(root: &Path, roster: Option<Vec<String>>, json: bool) -> anyhow::Result<()> {
    io::ensure_dir(&paths::cohort_dir(root))?;
    io::ensure_dir(&paths::sessions_dir(root))?;

    let config = match roster {
        Some(ids) => {
            let config = Config::with_roster(ids)?;
            config.save(root)?;
            config
        }
        None => {
            let config = Config::load(root)?;
            if !paths::config_path(root).exists() {
                config.save(root)?;
            }
            config
        }
    };

    // Sidecar lock files are runtime noise, not state worth committing.
    io::ensure_gitignore_entry(root, ".cohort/locks.yaml.lock")?;
    io::ensure_gitignore_entry(root, ".cohort/discoveries.yaml.lock")?;

    if json {
        print_json(&serde_json::json!({
            "root": root,
            "roster": config.roster,
        }))?;
    } else {
        println!(
            "initialized {} (roster: {})",
            paths::cohort_dir(root).display(),
            config.roster.join(", ")
        );
    }
    Ok(())
}

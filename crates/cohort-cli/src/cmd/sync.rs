use crate::output::{print_json, print_table};
use std::path::Path;

/// One poll of shared state: every lock claim, plus discoveries the acting
/// session did not author. Read-only and safe on a fresh checkout.
pub fn run(root: &Path, session: Option<&str>, json: bool) -> anyhow::Result<()> {
    let coord = super::bind_if_possible(root, session);
    let view = coord.sync()?;

    if json {
        return print_json(&view);
    }

    if view.locks.is_empty() {
        println!("locks: none");
    } else {
        println!("locks:");
        let rows = view
            .locks
            .iter()
            .map(|e| vec![e.path.clone(), e.session.clone()])
            .collect();
        print_table(&["PATH", "SESSION"], rows);
    }

    if view.discoveries.is_empty() {
        println!("discoveries: none new");
    } else {
        println!("discoveries:");
        let rows = view
            .discoveries
            .iter()
            .map(|d| {
                vec![
                    d.session.clone(),
                    d.kind.to_string(),
                    d.content.clone(),
                ]
            })
            .collect();
        print_table(&["SESSION", "KIND", "CONTENT"], rows);
    }
    Ok(())
}

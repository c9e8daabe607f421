use crate::output::{print_json, print_table};
use clap::Subcommand;
use cohort_core::types::DiscoveryKind;
use std::path::Path;

#[derive(Subcommand)]
pub enum DiscoverySubcommand {
    /// Record a note for other sessions (kind: finding, decision, blocker)
    Add { kind: String, content: String },
    /// List discoveries from other sessions (append order)
    List {
        /// Include the acting session's own entries
        #[arg(long)]
        all: bool,
    },
}

pub fn run(
    root: &Path,
    session: Option<&str>,
    subcmd: DiscoverySubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        DiscoverySubcommand::Add { kind, content } => add(root, session, &kind, &content, json),
        DiscoverySubcommand::List { all } => list(root, session, all, json),
    }
}

fn add(root: &Path, session: Option<&str>, kind: &str, content: &str, json: bool) -> anyhow::Result<()> {
    let kind: DiscoveryKind = kind.parse()?;
    let coord = super::bind(root, session)?;
    coord.append(kind, content)?;
    if json {
        print_json(&serde_json::json!({
            "session": coord.current_session(),
            "kind": kind.as_str(),
            "content": content,
        }))?;
    } else {
        println!("recorded {kind}: {content}");
    }
    Ok(())
}

fn list(root: &Path, session: Option<&str>, all: bool, json: bool) -> anyhow::Result<()> {
    let coord = super::bind_if_possible(root, session);
    let exclude = if all { None } else { coord.current_session() };
    let discoveries = coord.list(exclude)?;
    if json {
        return print_json(&discoveries);
    }
    if discoveries.is_empty() {
        println!("no discoveries");
        return Ok(());
    }
    let rows = discoveries
        .iter()
        .map(|d| {
            vec![
                d.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                d.session.clone(),
                d.kind.to_string(),
                d.content.clone(),
            ]
        })
        .collect();
    print_table(&["WHEN", "SESSION", "KIND", "CONTENT"], rows);
    Ok(())
}

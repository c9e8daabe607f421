use crate::output::{print_json, print_table};
use clap::Subcommand;
use cohort_core::session::Session;
use cohort_core::Coordinator;
use std::path::Path;

#[derive(Subcommand)]
pub enum SessionSubcommand {
    /// Start (or reset) a roster session and make it the acting one
    Start { id: String },
    /// List every started session in roster order
    List,
    /// Show the acting session
    Current,
    /// Record what the acting session is working on
    Task { text: String },
}

pub fn run(
    root: &Path,
    session: Option<&str>,
    subcmd: SessionSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        SessionSubcommand::Start { id } => start(root, &id, json),
        SessionSubcommand::List => list(root, json),
        SessionSubcommand::Current => current(root, session, json),
        SessionSubcommand::Task { text } => task(root, session, &text, json),
    }
}

fn start(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut coord = Coordinator::new(root);
    let record = coord.start(id)?;
    if json {
        print_json(&record)?;
    } else {
        println!("session '{id}' started");
        println!("export COHORT_SESSION={id} to act as it in this shell");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let coord = Coordinator::new(root);
    let sessions = coord.status()?;
    if json {
        return print_json(&sessions);
    }
    if sessions.is_empty() {
        println!("no sessions started");
        return Ok(());
    }
    let rows = sessions.iter().map(session_row).collect();
    print_table(&["SESSION", "LAST ACTIVE", "TASK", "LOCKS"], rows);
    Ok(())
}

fn session_row(s: &Session) -> Vec<String> {
    vec![
        s.id.clone(),
        s.last_active.format("%Y-%m-%d %H:%M:%S").to_string(),
        s.current_task.clone().unwrap_or_else(|| "-".to_string()),
        s.locked_files.len().to_string(),
    ]
}

fn current(root: &Path, session: Option<&str>, json: bool) -> anyhow::Result<()> {
    let coord = super::bind_if_possible(root, session);
    if json {
        return print_json(&serde_json::json!({ "session": coord.current_session() }));
    }
    match coord.current_session() {
        Some(id) => println!("{id}"),
        None => println!("no acting session"),
    }
    Ok(())
}

fn task(root: &Path, session: Option<&str>, text: &str, json: bool) -> anyhow::Result<()> {
    let coord = super::bind(root, session)?;
    let record = coord.set_task(text)?;
    if json {
        print_json(&record)?;
    } else {
        println!("session '{}' now working on: {text}", record.id);
    }
    Ok(())
}

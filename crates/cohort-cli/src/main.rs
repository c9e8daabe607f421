mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{discovery::DiscoverySubcommand, lock::LockSubcommand, session::SessionSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cohort",
    about = "Multi-session coordination — share file locks and discoveries between concurrent assistant sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .cohort/ or .git/)
    #[arg(long, global = true, env = "COHORT_ROOT")]
    root: Option<PathBuf>,

    /// Acting session id (each assistant process sets its own)
    #[arg(long, global = true, short = 's', env = "COHORT_SESSION")]
    session: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize coordination state in the current project
    Init {
        /// Comma-separated roster of allowed session ids
        #[arg(long, value_delimiter = ',')]
        roster: Option<Vec<String>>,
    },

    /// Manage sessions
    Session {
        #[command(subcommand)]
        subcommand: SessionSubcommand,
    },

    /// Manage advisory file locks
    Lock {
        #[command(subcommand)]
        subcommand: LockSubcommand,
    },

    /// Record and read shared discoveries
    Discovery {
        #[command(subcommand)]
        subcommand: DiscoverySubcommand,
    },

    /// Show other sessions' locks and discoveries
    Sync,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let session = cli.session.as_deref();

    let result = match cli.command {
        Commands::Init { roster } => cmd::init::run(&root, roster, cli.json),
        Commands::Session { subcommand } => cmd::session::run(&root, session, subcommand, cli.json),
        Commands::Lock { subcommand } => cmd::lock::run(&root, session, subcommand, cli.json),
        Commands::Discovery { subcommand } => {
            cmd::discovery::run(&root, session, subcommand, cli.json)
        }
        Commands::Sync => cmd::sync::run(&root, session, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

//! Operator front end for the pose workspace: import problems into session
//! states, export solutions, inspect edge strain.

use clap::{Parser, Subcommand};
use posefit::config::EditorConfig;
use posefit::store::Workspace;
use posefit::Session;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "posefit", version, about = "Fit rigid figures into boundary polygons")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON editor configuration; missing fields take their defaults.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Place the problems/states/solutions/poses_ids directories under DIR.
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// -v for debug, -vv for trace. RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Build a fresh session state from a problem file.
    Import {
        problem: u32,
        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Write the current pose of a problem as a solution file.
    Export { problem: u32 },
    /// Print every edge with its stretch ratio and legality.
    Report { problem: u32 },
    /// Remove the saved state so the next open starts from the problem.
    Reset { problem: u32 },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(code = error.code(), "{error}");
            eprintln!("error: {error}");
            1
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn workspace(cli: &Cli) -> posefit::Result<Workspace> {
    let mut config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(root) = &cli.root {
        let rooted = EditorConfig::rooted(root);
        config.problems_dir = rooted.problems_dir;
        config.states_dir = rooted.states_dir;
        config.solutions_dir = rooted.solutions_dir;
        config.poses_dir = rooted.poses_dir;
    }
    Ok(Workspace::new(config))
}

fn run(cli: &Cli) -> posefit::Result<()> {
    let ws = workspace(cli)?;
    match cli.command {
        Command::Import { problem, force } => {
            if ws.state_path(problem).exists() {
                if !force {
                    tracing::warn!(problem, "state already present, pass --force to overwrite");
                    return Ok(());
                }
                tracing::warn!(problem, "overwriting saved state");
            }
            let p = ws.load_problem(problem)?;
            let session = Session::from_problem(&p, ws.config().transform()?)?;
            let path = ws.save_state(problem, &session)?;
            println!("{}", path.display());
        }
        Command::Export { problem } => {
            let session = ws.open_session(problem)?;
            let path = ws.write_solution(problem, &session.export_solution())?;
            println!("{}", path.display());
        }
        Command::Report { problem } => {
            let session = ws.open_session(problem)?;
            let report = session.strain_report();
            let illegal = report.iter().filter(|s| !s.is_legal()).count();
            for s in &report {
                println!(
                    "edge {:>5}  original {:>10.3}  current {:>10.3}  ratio {:>10.6}  bound {:>10.6}  {}",
                    s.edge,
                    s.original_length,
                    s.length,
                    s.ratio,
                    s.bound,
                    if s.is_legal() { "ok" } else { "ILLEGAL" },
                );
            }
            println!("{} edges, {} illegal", report.len(), illegal);
        }
        Command::Reset { problem } => {
            if ws.remove_state(problem)? {
                tracing::info!(problem, "state removed");
            } else {
                tracing::info!(problem, "no saved state");
            }
        }
    }
    Ok(())
}

//! fwdport - forward-port hotfix commits, one at a time

mod cli;

use anstream::eprintln;
use clap::{Args, Parser, Subcommand};
use cli::CommandStatus;
use cli::style::Stylize;
use fwdport::types::IntegrationMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for a step waiting on conflict resolution
const EXIT_SUSPENDED: u8 = 3;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FWDPORT_LOG";

#[derive(Parser)]
#[command(name = "fwdport")]
#[command(about = "Forward-port hotfix commits into a develop branch, one commit at a time")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Path to the git repository
    #[arg(short, long, global = true, default_value = ".")]
    path: PathBuf,

    /// Do not wait for conflict resolution; save the step for 'fwdport continue'
    #[arg(long, global = true)]
    no_prompt: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate the next commit, skipping it when tagged @branch-specific
    Apply(BranchArgs),
    /// Record the next commit as integrated without applying its changes
    Skip(BranchArgs),
    /// Integrate the next commit's changes even when tagged @branch-specific
    Merge(BranchArgs),
    /// Print the message the next integration would commit
    Show(BranchArgs),
    /// List the commits still waiting to be integrated
    List(BranchArgs),
    /// Finish an integration that stopped on merge conflicts
    Continue,
}

#[derive(Args)]
struct BranchArgs {
    /// Branch to take commits from (e.g. hotfix)
    from: String,
    /// Branch to integrate into; must be checked out
    into: String,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli.path.as_path();
    let result = match &cli.command {
        Commands::Apply(args) => {
            cli::run_integrate(path, &args.from, &args.into, IntegrationMode::Auto, cli.no_prompt)
        }
        Commands::Skip(args) => cli::run_integrate(
            path,
            &args.from,
            &args.into,
            IntegrationMode::ForceSkip,
            cli.no_prompt,
        ),
        Commands::Merge(args) => cli::run_integrate(
            path,
            &args.from,
            &args.into,
            IntegrationMode::ForceMerge,
            cli.no_prompt,
        ),
        Commands::Show(args) => cli::run_show(path, &args.from, &args.into),
        Commands::List(args) => cli::run_list(path, &args.from, &args.into),
        Commands::Continue => cli::run_continue(path, cli.no_prompt),
    };

    match result {
        Ok(CommandStatus::Done) => ExitCode::SUCCESS,
        Ok(CommandStatus::Suspended) => ExitCode::from(EXIT_SUSPENDED),
        Err(e) => {
            eprintln!("{} {e}", "error:".error());
            ExitCode::FAILURE
        }
    }
}

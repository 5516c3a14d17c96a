//! `rk` -- drive git through the repokit facade.
//!
//! Parses CLI arguments with clap, builds a configured `RepoClient` for the
//! target repository, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    // Verbose logging must cover discovery and config loading.
    if cli.global.verbose {
        init_logging(context::VERBOSE_FILTER);
    }

    let result = match cli.command {
        // Commands that do not need a repository.
        Some(Commands::Version) => commands::version::run(&cli.global),
        Some(Commands::Completion(ref args)) => commands::completion::run(args),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
        Some(ref command) => {
            debug!(?command, "building runtime context");
            RuntimeContext::from_global_args(&cli.global).and_then(|ctx| {
                if let Some(filter) = ctx.log_filter() {
                    init_logging(filter);
                }
                debug!(repo = %ctx.client.repo_path().display(), ?command, "dispatching");
                dispatch(&ctx, command)
            })
        }
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Install a stderr `tracing` subscriber with the given filter directive.
fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring invalid log filter '{}': {}", filter, e);
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(ctx: &RuntimeContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Stage => commands::commit::run_stage(ctx),
        Commands::Commit(args) => commands::commit::run_commit(ctx, args),
        Commands::Push(args) => commands::commit::run_push(ctx, args),
        Commands::Status => commands::inspect::run_status(ctx),
        Commands::LastCommit => commands::inspect::run_last_commit(ctx),
        Commands::Diff => commands::inspect::run_diff(ctx),
        Commands::Resolve(args) => commands::resolve::run_resolve(ctx, args),
        Commands::FetchedHash => commands::resolve::run_fetched_hash(ctx),
        Commands::MergeBase(args) => commands::resolve::run_merge_base(ctx, args),
        Commands::Merge(args) => commands::integrate::run_merge(ctx, args),
        Commands::Rebase(args) => commands::integrate::run_rebase(ctx, args),
        Commands::RebaseContinue => commands::integrate::run_rebase_continue(ctx),
        Commands::SquashOnto(args) => commands::integrate::run_squash_onto(ctx, args),
        Commands::AddRemote(args) => commands::remote::run(ctx, args),
        Commands::Submodules(args) => commands::submodules::run_list(ctx, args),
        Commands::ForeachStatus => commands::submodules::run_foreach_status(ctx),
        // Handled before a context is built.
        Commands::Version | Commands::Completion(_) => Ok(()),
    }
}

mod commands;
mod config;
mod watcher;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    build, check, init, pull, push, serve, BuildArgs, CheckArgs, InitArgs, PullArgs, PushArgs,
    ServeArgs,
};
use tracing_subscriber::EnvFilter;

/// CipherStudio CLI - build, check and live-preview React playground projects
#[derive(Parser, Debug)]
#[command(name = "cipherstudio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and a seeded project
    Init(InitArgs),

    /// Build the standalone preview document for a project
    Build(BuildArgs),

    /// Validate a project file and show how the preview will resolve it
    Check(CheckArgs),

    /// Serve a live preview that rebuilds when the project file changes
    Serve(ServeArgs),

    /// Save the project to the backend
    Push(PushArgs),

    /// Load a project from the backend
    Pull(PullArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Build(args) => build(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Serve(args) => serve(args, &cwd).await,
        Command::Push(args) => push(args, &cwd).await,
        Command::Pull(args) => pull(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

mod commands;
mod config;
mod documents;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, generate, init, CheckArgs, GenerateArgs, InitArgs};
use tracing_subscriber::EnvFilter;

/// sqlts - TypeScript declarations from SQL Server query metadata
#[derive(Parser, Debug)]
#[command(name = "sqlts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log generation details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new sqlts project
    Init(InitArgs),

    /// Generate declarations from metadata documents
    Generate(GenerateArgs),

    /// Report every unsupported type and empty result set
    Check(CheckArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Generate(args) => generate(args, &cwd),
        Command::Check(args) => check(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

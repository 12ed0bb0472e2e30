use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Command::Solve(args) => args.run(),
        Command::Run(args) => args.run(),
        Command::Play(args) => args.run(),
    }
}

/// Log to stderr so frame output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "hanoi", about = "Towers of Hanoi solver and animation driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the move sequence that solves a stack.
    Solve(cli::solve::SolveArgs),
    /// Animate a full solve without a window, optionally streaming frames.
    Run(cli::run::RunArgs),
    /// Drive the animation interactively from the keyboard.
    Play(cli::play::PlayArgs),
}

mod cli;

use std::error::Error;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Diff(args) => cli::diff::handle_diff_command(args),
        Command::Apply(args) => cli::apply::handle_apply_command(args),
        Command::Query(args) => cli::query::handle_query_command(args),
    }
}

//! Pantry CLI - a local-first personal recipe manager
//!
//! This is the command-line interface for Pantry. It provides a thin,
//! user-friendly surface over the core library.

mod cli;
mod commands;
mod config;
mod helpers;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PANTRY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Add(args) => commands::handle_add(cli, args),
        Commands::List(args) => commands::handle_list(cli, args),
        Commands::Show(args) => commands::handle_show(cli, args),
        Commands::Delete(args) => commands::handle_delete(cli, args),
        Commands::Export(args) => commands::handle_export(cli, args),
        Commands::Import(args) => commands::handle_import(cli, args),
        Commands::Categories => commands::handle_categories(cli),
        Commands::Clear(args) => commands::handle_clear(cli, args),
        Commands::Completions { shell } => commands::handle_completions(*shell),
    }
}

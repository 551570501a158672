//! Gadgetkit command-line entry point.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use gadgetkit::cli::{self, Cli, Commands};
use gadgetkit::config::GadgetConfig;
use gadgetkit::{log, logger};

fn main() {
    if let Err(e) = run() {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = GadgetConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Js { args } => cli::js::run_js(args, &config),
        Commands::Rewrite { args } => cli::rewrite::run_rewrite(args, &config),
    }
}

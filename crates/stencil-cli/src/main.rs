//! Stencil CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use stencil_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Panics are rendered by miette as well
    miette::set_panic_hook();

    let args = Args::parse();

    // An unknown level falls back to `warn`
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?, representation:% = args.representation; "Starting Stencil");
    debug!(args:?; "Parsed arguments");

    let Err(err) = stencil_cli::run(&args) else {
        info!(output = args.output; "Completed successfully");
        return;
    };

    // One report per reportable; model format errors carry a source span
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(&err) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            writer = reportable.to_string();
        }
        error!("Failed to render {}\n{writer}", args.input);
    }
    process::exit(1);
}

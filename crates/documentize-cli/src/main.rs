//! Documentize CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use documentize::DocumentizeError;
use documentize_cli::{Args, error_adapter::reports};

/// Renders every report of `err`, raised while processing `origin`.
fn render_error(origin: &str, err: &DocumentizeError) -> String {
    let handler = miette::GraphicalReportHandler::new();

    let mut rendered = String::new();
    for report in reports(origin, err) {
        if handler.render_report(&mut rendered, &report).is_err() {
            rendered.push_str(report.message());
        }
    }
    rendered
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

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

    info!(log_level:?; "Starting Documentize");
    debug!(args:?; "Parsed arguments");

    let summary = match documentize_cli::run(&args) {
        Ok(summary) => summary,
        Err(err) => {
            error!("{}", render_error("declarations", &err));
            process::exit(1);
        }
    };

    for failure in &summary.failures {
        error!("Failed to document {}\n{}", failure.path, render_error(&failure.path, &failure.error));
    }

    if !summary.is_success() {
        process::exit(1);
    }

    info!("Completed successfully");
}

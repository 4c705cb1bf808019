/*!
 * Command-line interface for filetools
 */

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use filetools::config::{Args, Config};
use filetools::report::{ReportFormat, Reporter};
use filetools::types::{Action, Outcome, OutcomeStatus};
use filetools::{check_empty_files, copy_files, generate_structure, ExclusionPolicy};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "filetools", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    let policy = ExclusionPolicy::default();

    let progress = if config.show_progress() {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} files {wide_msg:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    } else {
        ProgressBar::hidden()
    };

    let source = config.source.as_path();
    let dest = config.dest.as_deref();
    let result = match config.action {
        Action::Copy => copy_files(&policy, source, dest, config.copy_options, progress.clone()),
        Action::CheckEmpty => check_empty_files(&policy, source, dest),
        Action::Structure => generate_structure(&policy, source, dest),
    };
    progress.finish_and_clear();

    // Setup errors are reported the same way as any other failure
    let outcome = result.unwrap_or_else(|e| Outcome::failed(config.action, e.to_string()));

    let format = if config.json {
        ReportFormat::Json
    } else {
        ReportFormat::ConsoleTable
    };
    if let Err(e) = Reporter::new(format).print_report(&outcome) {
        eprintln!("Error: {}", e);
        return ExitCode::from(1);
    }

    match outcome.status {
        OutcomeStatus::Success => ExitCode::SUCCESS,
        OutcomeStatus::Partial => ExitCode::from(2),
        OutcomeStatus::Failed => ExitCode::from(1),
    }
}

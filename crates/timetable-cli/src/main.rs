//! timetable CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use timetable_cli::cli::{Cli, Command, ConfigAction, ShareAction};
use timetable_cli::commands;
use timetable_cli::config::CliConfig;
use timetable_cli::error::{CliError, CliResult};
use timetable_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug)) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = if let Some(ref path) = cli.config {
        CliConfig::load_from(path).map_err(CliError::Config)?
    } else {
        CliConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable config");
            CliConfig::default()
        })
    };
    if cli.year.is_some() {
        config.academic_year = cli.year;
    }
    let ctx = config.date_context();

    match cli.command {
        Command::Parse { source } => commands::parse::run(&source),
        Command::List(args) => commands::list::run(&args, &ctx),
        Command::Compare(args) => commands::compare::run(&args, &config.compare, &ctx),
        Command::Share { action } => match action {
            ShareAction::Encode {
                source,
                name,
                base_url,
            } => commands::share::encode(
                &source,
                name.as_deref(),
                base_url.as_deref().or(config.share.base_url.as_deref()),
            ),
            ShareAction::Decode { input } => commands::share::decode(&input),
        },
        Command::Export {
            source,
            custom,
            output,
        } => commands::export::run(&source, custom.as_deref(), output.as_deref(), &ctx),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, cli.config.as_deref()),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(cli.config.as_deref()),
        },
    }
}

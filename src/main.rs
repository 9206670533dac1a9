mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::{Cli, Command};
use tscat_config::Config;
use tscat_logger::LogLevel;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load config first to get logging and check settings
    let (config, config_error) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => config_or_default(Config::load()),
    };
    if let Some(message) = &config_error {
        eprintln!("{}", message);
    }

    init_logging(&cli, &config);
    if let Some(message) = config_error {
        log::warn!("{}", message);
    }

    match cli.command {
        Command::Lookup {
            file,
            context,
            source,
            comment,
            count,
            args,
        } => {
            let text = commands::lookup(&file, &context, &source, comment.as_deref(), count, &args)?;
            println!("{}", text);
        }
        Command::Tr {
            context,
            source,
            lang,
            args,
        } => {
            println!("{}", commands::tr(&config, lang.as_deref(), &context, &source, &args)?);
        }
        Command::Check { files, json } => {
            let options = commands::check_options(&config.check);
            return commands::check(&files, &options, json);
        }
        Command::Stats { files, json } => println!("{}", commands::stats(&files, json)?),
        Command::Normalize {
            file,
            output,
            check,
        } => return commands::normalize(&file, output.as_deref(), check),
        Command::Contexts { file } => {
            let listing = commands::contexts(&file)?;
            if !listing.is_empty() {
                println!("{}", listing);
            }
        }
        Command::Languages { dir, prefix } => {
            for lang in commands::languages(&config, dir.as_deref(), prefix.as_deref())? {
                println!("{}", lang);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Fall back to defaults on a broken config, keeping the reason to report.
fn config_or_default(loaded: Result<Config>) -> (Config, Option<String>) {
    match loaded {
        Ok(config) => (config, None),
        Err(err) => (
            Config::default(),
            Some(format!("{:#}; using default settings", err)),
        ),
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    let level_name = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.min_level);
    let level = level_name.parse::<LogLevel>().unwrap_or_else(|err| {
        eprintln!("{}, using info", err);
        LogLevel::Info
    });

    tscat_logger::init(
        config.log_file_path().ok(),
        config.logging.max_entries,
        level,
    );
    tscat_logger::set_echo(cli.verbose);
    if let Err(err) = tscat_logger::install(level) {
        eprintln!("Failed to install logger: {}", err);
    }
}

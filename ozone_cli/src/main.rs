//! CLI entry point: config loading, tracing setup, command dispatch.

mod cli;
mod error_fmt;
mod run;

use clap::Parser;
use eyre::WrapErr;
use std::fs;
use std::path::Path;

use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use ozone_config::{Config, Logging};

fn main() {
    let args = Cli::parse();
    let _ = JSON_MODE.set(args.json);
    let _ = color_eyre::install();

    if let Err(err) = real_main(args) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            println!("{}", error_fmt::json_error(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(2);
    }
}

fn real_main(args: Cli) -> eyre::Result<()> {
    let cfg = load_config(&args.config)?;
    init_tracing(&args.log_level, args.json, &cfg.logging);

    match &args.cmd {
        Commands::Run {
            ticks,
            scenario,
            disturbance,
            seed,
            tick_ms,
            capacity,
        } => run::run_simulation(
            &cfg,
            args.json,
            &run::RunArgs {
                ticks: *ticks,
                scenario: scenario.clone(),
                disturbance: *disturbance,
                seed: *seed,
                tick_ms: *tick_ms,
                capacity: *capacity,
            },
        ),
        Commands::Scenarios => run::list_scenarios(&cfg, args.json),
        Commands::SelfCheck => run::self_check(&cfg, args.json),
    }
}

/// Load and validate the TOML config; a missing file means defaults.
fn load_config(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config file {}", path.display()))?;
    let cfg = ozone_config::load_toml(&text)
        .wrap_err_with(|| format!("parsing config file {}", path.display()))?;
    cfg.validate()
        .wrap_err_with(|| format!("validating config file {}", path.display()))?;
    Ok(cfg)
}

/// Console logging by default; a file appender when the config names one.
fn init_tracing(level: &str, json: bool, logging: &Logging) {
    use tracing_subscriber::EnvFilter;

    let level = logging.level.as_deref().unwrap_or(level);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    if let Some(file) = &logging.file {
        let path = Path::new(file);
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path.file_name().map(|f| f.to_string_lossy().into_owned());
        let name = name.unwrap_or_else(|| "ozone.log".to_string());
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .init();
    } else if json {
        // Keep stdout clean for JSONL payloads; logs go to stderr.
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

mod commands;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, Write},
    path::Path,
};

use tablebook_core::{
    config::{self, AppConfig},
    ReservationStore,
};
use tracing_subscriber::{prelude::*, EnvFilter};

use commands::{execute, Command, HELP};

fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;

    let mut store = ReservationStore::from_config(&config)
        .context("failed to initialise reservation store")?;
    tracing::info!(
        "store ready: {} tables, up to {} reservations",
        store.tables().len(),
        store.limits().max_reservations
    );

    println!("{HELP}");
    run(&mut store, io::stdin().lock(), io::stdout())
}

fn run(store: &mut ReservationStore, input: impl BufRead, mut output: impl Write) -> Result<()> {
    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => match execute(store, command) {
                Ok(text) => writeln!(output, "{text}")?,
                Err(err) => {
                    tracing::debug!("command '{line}' failed: {err:#}");
                    writeln!(output, "error: {err:#}")?;
                }
            },
            Ok(None) => {}
            Err(err) => writeln!(output, "error: {err:#}")?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    Ok(())
}

fn init_logging(log_dir: &Path) -> Result<()> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("tablebook.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

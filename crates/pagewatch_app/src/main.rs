mod config;
mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use pagewatch_engine::{MonitorHandle, Registry};
use watch_logging::watch_info;

use crate::config::AppConfig;
use crate::shell::{execute, parse_command, Command};

fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    watch_logging::initialize(config.log_destination(), config.log_level());

    let registry = Registry::from_settings(config.monitor_settings())
        .context("failed to build http client")?;
    let monitor = MonitorHandle::new(registry).context("failed to start runtime")?;
    watch_info!("pagewatch ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", shell::HELP)?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        for output in execute(&monitor, command) {
            writeln!(stdout, "{output}")?;
        }
        stdout.flush()?;
    }
    Ok(())
}

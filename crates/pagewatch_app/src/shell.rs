//! Line-oriented front end over [`MonitorHandle`].

use chrono::{DateTime, Local, Utc};
use pagewatch_core::{ResourceSnapshot, ResourceState};
use pagewatch_engine::{MonitorError, MonitorHandle};

pub const HELP: &str = "commands: add <url> | check <url> | remove <url> | list | help | quit";

const DISPLAY_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Check(String),
    Remove(String),
    List,
    Help,
    Quit,
}

/// `Ok(None)` for blank lines; `Err` carries a message for the user.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments for {verb:?}"));
    }

    let with_url = |build: fn(String) -> Command| match arg {
        Some(url) => Ok(Some(build(url.to_string()))),
        None => Err(format!("{verb} needs a url")),
    };
    match verb.to_ascii_lowercase().as_str() {
        "add" => with_url(Command::Add),
        "check" => with_url(Command::Check),
        "remove" | "rm" => with_url(Command::Remove),
        "list" | "ls" if arg.is_none() => Ok(Some(Command::List)),
        "help" | "?" => Ok(Some(Command::Help)),
        "quit" | "exit" => Ok(Some(Command::Quit)),
        _ => Err(format!("unknown command {line:?}; {HELP}")),
    }
}

pub fn execute(monitor: &MonitorHandle, command: Command) -> Vec<String> {
    match command {
        Command::Add(url) => vec![match monitor.add(&url) {
            Ok(snap) => format!("added {}", render(&snap)),
            Err(err) => describe_error(&err),
        }],
        Command::Check(url) => vec![match monitor.check(&url) {
            Ok(snap) => format!("checked {}", render(&snap)),
            Err(err) => describe_error(&err),
        }],
        Command::Remove(url) => vec![match monitor.remove(&url) {
            Ok(()) => format!("removed {url}"),
            Err(err) => describe_error(&err),
        }],
        Command::List => {
            let listing = monitor.list();
            if listing.is_empty() {
                return vec!["no pages tracked".to_string()];
            }
            listing.iter().map(|snap| render(&snap)).collect()
        }
        Command::Help => vec![HELP.to_string()],
        Command::Quit => Vec::new(),
    }
}

pub fn render(snap: &ResourceSnapshot) -> String {
    let mut line = format!(
        "{} [{}] checked {} current {}",
        snap.url,
        snap.state,
        format_timestamp(snap.last_checked_at),
        snap.current_fingerprint.short(12)
    );
    if snap.state == ResourceState::Error {
        if let Some(err) = &snap.last_error {
            line.push_str(&format!(" error: {err}"));
        }
    }
    line
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DISPLAY_TIME_FORMAT).to_string()
}

fn describe_error(err: &MonitorError) -> String {
    match err {
        MonitorError::InvalidUrl { url, .. } => {
            format!("invalid url {url:?}; use a full address such as https://example.com")
        }
        MonitorError::AlreadyTracked(url) => format!("{url} is already being monitored"),
        MonitorError::NotFound(url) => format!("{url} is not being monitored"),
        other => format!("error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pagewatch_core::{Fingerprint, MonitoredResource};

    use super::{format_timestamp, parse_command, render, Command};

    #[test]
    fn parses_commands_with_urls() {
        assert_eq!(
            parse_command("add https://example.com"),
            Ok(Some(Command::Add("https://example.com".to_string())))
        );
        assert_eq!(
            parse_command("  CHECK   https://example.com  "),
            Ok(Some(Command::Check("https://example.com".to_string())))
        );
        assert_eq!(
            parse_command("rm https://example.com"),
            Ok(Some(Command::Remove("https://example.com".to_string())))
        );
        assert_eq!(parse_command("list"), Ok(Some(Command::List)));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn blank_lines_are_skipped_and_bad_input_is_reported() {
        assert_eq!(parse_command("   "), Ok(None));
        assert!(parse_command("add").is_err());
        assert!(parse_command("add a b").is_err());
        assert!(parse_command("list extra").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn timestamp_uses_day_month_year_layout() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let shown = format_timestamp(at);
        assert_eq!(shown.len(), "15/03/2024 12:00:00".len());
        assert!(shown.contains("/03/2024"), "{shown}");
    }

    #[test]
    fn render_includes_state_and_error() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let mut resource =
            MonitoredResource::new("https://example.com", Fingerprint::from_hex("ab".repeat(32)), at);
        assert!(render(&resource.snapshot()).contains("[unchanged]"));

        resource.record_failure("fetch failed: timeout", at);
        let line = render(&resource.snapshot());
        assert!(line.contains("[error]"));
        assert!(line.ends_with("error: fetch failed: timeout"));
    }
}

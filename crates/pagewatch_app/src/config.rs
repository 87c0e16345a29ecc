use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use pagewatch_engine::{FetchSettings, MonitorSettings};
use serde::{Deserialize, Serialize};
use watch_logging::LogDestination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogTarget {
    #[default]
    Terminal,
    File,
    Both,
}

/// Optional RON configuration; every field falls back to the engine defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub redirect_limit: Option<usize>,
    pub max_bytes: Option<u64>,
    pub user_agent: Option<String>,
    pub allowed_content_types: Vec<String>,
    pub strict_decoding: bool,
    pub log_target: LogTarget,
    pub verbose: bool,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        Self::parse(&content).with_context(|| format!("failed to parse config {:?}", path))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        let defaults = FetchSettings::default();
        MonitorSettings {
            fetch: FetchSettings {
                connect_timeout: self
                    .connect_timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.connect_timeout),
                request_timeout: self
                    .request_timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.request_timeout),
                redirect_limit: self.redirect_limit.unwrap_or(defaults.redirect_limit),
                max_bytes: self.max_bytes.unwrap_or(defaults.max_bytes),
                user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
                allowed_content_types: self.allowed_content_types.clone(),
            },
            strict_decoding: self.strict_decoding,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log_target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

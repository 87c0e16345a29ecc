use std::fmt;

use chrono::{DateTime, Utc};

use crate::{CanonicalText, Fingerprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceState {
    Unchanged,
    Changed,
    Error,
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceState::Unchanged => write!(f, "unchanged"),
            ResourceState::Changed => write!(f, "changed"),
            ResourceState::Error => write!(f, "error"),
        }
    }
}

/// Immutable copy of a [`crate::MonitoredResource`] taken at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub url: String,
    pub baseline_fingerprint: Fingerprint,
    pub baseline_text: CanonicalText,
    pub current_fingerprint: Fingerprint,
    pub last_checked_at: DateTime<Utc>,
    pub changed: bool,
    pub last_error: Option<String>,
    pub state: ResourceState,
}

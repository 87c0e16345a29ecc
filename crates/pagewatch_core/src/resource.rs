use chrono::{DateTime, Utc};

use crate::{CanonicalText, Fingerprint, ResourceSnapshot, ResourceState};

/// One tracked URL and everything known about it.
///
/// The baseline is fixed at registration; `changed` and the current
/// fingerprint only move on successful checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredResource {
    url: String,
    baseline: Fingerprint,
    baseline_text: CanonicalText,
    current: Fingerprint,
    last_checked_at: DateTime<Utc>,
    changed: bool,
    last_error: Option<String>,
}

impl MonitoredResource {
    /// Creates a record from the fingerprint captured at registration time.
    pub fn new(url: impl Into<String>, baseline: Fingerprint, registered_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            current: baseline.clone(),
            baseline,
            baseline_text: CanonicalText::default(),
            last_checked_at: registered_at,
            changed: false,
            last_error: None,
        }
    }

    /// Keeps the canonical text the baseline fingerprint was computed from.
    pub fn with_baseline_text(mut self, text: CanonicalText) -> Self {
        self.baseline_text = text;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn baseline(&self) -> &Fingerprint {
        &self.baseline
    }

    pub fn baseline_text(&self) -> &CanonicalText {
        &self.baseline_text
    }

    pub fn current(&self) -> &Fingerprint {
        &self.current
    }

    pub fn last_checked_at(&self) -> DateTime<Utc> {
        self.last_checked_at
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> ResourceState {
        if self.last_error.is_some() {
            ResourceState::Error
        } else if self.changed {
            ResourceState::Changed
        } else {
            ResourceState::Unchanged
        }
    }

    /// Applies a successful check: compares against the baseline, never the
    /// previous fingerprint.
    pub fn record_success(&mut self, fingerprint: Fingerprint, checked_at: DateTime<Utc>) {
        self.changed = fingerprint != self.baseline;
        self.current = fingerprint;
        self.last_checked_at = checked_at;
        self.last_error = None;
    }

    /// Applies a failed check. Fingerprints and `changed` keep their last-known values.
    pub fn record_failure(&mut self, cause: impl Into<String>, checked_at: DateTime<Utc>) {
        self.last_error = Some(cause.into());
        self.last_checked_at = checked_at;
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            url: self.url.clone(),
            baseline_fingerprint: self.baseline.clone(),
            baseline_text: self.baseline_text.clone(),
            current_fingerprint: self.current.clone(),
            last_checked_at: self.last_checked_at,
            changed: self.changed,
            last_error: self.last_error.clone(),
            state: self.state(),
        }
    }
}

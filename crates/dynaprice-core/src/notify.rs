//! Transient status messages ("toasts").
//!
//! One message is visible at a time. A new message replaces the current one
//! and restarts its timer; there is no queue.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info};

/// How long a message stays visible.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// Visual classification of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    ttl: Duration,
    current: Option<(Notification, Instant)>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DISPLAY_DURATION)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notify_at(Instant::now(), message, severity);
    }

    pub fn notify_at(&mut self, now: Instant, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        match severity {
            Severity::Error => error!(target: "dynaprice::toast", %message),
            _ => info!(target: "dynaprice::toast", %severity, %message),
        }
        self.current = Some((Notification { message, severity }, now));
    }

    /// The message visible at `now`, if its timer has not run out.
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|(_, shown)| now.saturating_duration_since(*shown) < self.ttl)
            .map(|(n, _)| n)
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    /// Last message regardless of expiry.
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    /// Hand the pending message to a renderer and clear it.
    pub fn take(&mut self) -> Option<Notification> {
        self.current.take().map(|(n, _)| n)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

//! Status/diagnostic channel.
//!
//! Recoverable conditions (malformed values, checksum mismatches) are
//! reported as `(severity, message, detail)` triples. The callback is
//! optional; every report is also emitted as a `tracing` event.

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Severity of a status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Callback signature consumed by a front end.
pub type StatusCallback = Arc<dyn Fn(Severity, &str, &str) + Send + Sync>;

/// Status channel with an optional callback. Defaults to a no-op sink.
#[derive(Clone, Default)]
pub struct StatusChannel {
    callback: Option<StatusCallback>,
}

impl StatusChannel {
    /// Channel that only logs.
    pub fn none() -> Self {
        Self { callback: None }
    }

    /// Channel that logs and forwards to `callback`.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Severity, &str, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    /// Emit one report.
    pub fn report(&self, severity: Severity, message: &str, detail: &str) {
        match severity {
            Severity::Info => tracing::info!(detail, "{message}"),
            Severity::Warning => tracing::warn!(detail, "{message}"),
            Severity::Error => tracing::error!(detail, "{message}"),
        }
        if let Some(cb) = &self.callback {
            cb(severity, message, detail);
        }
    }

    pub fn callback(&self) -> Option<&StatusCallback> {
        self.callback.as_ref()
    }

    /// Shorthand for a warning report.
    pub fn warn(&self, message: &str, detail: &str) {
        self.report(Severity::Warning, message, detail);
    }
}

impl fmt::Debug for StatusChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusChannel")
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

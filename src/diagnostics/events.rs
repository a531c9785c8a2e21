// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types recorded by the banner queue.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Category of a recovered, non-fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A bypassing `show` replaced another bypassing banner that had not run yet.
    InterruptSuperseded,
    /// A completion or timer arrived for a banner that is no longer in that stage.
    StaleSignal,
    Other,
}

/// Category of a failure the queue recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ShowFailed,
    HideFailed,
    RefreshFailed,
    ObserverPanicked,
    TapHandlerPanicked,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with the moment it was recorded.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Monotonic timestamp.
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A lifecycle notification was emitted for a banner.
    Lifecycle {
        /// Event label (`will-show`, `did-hide`, ...).
        event: String,
        message_id: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        reuse_identifier: Option<String>,
    },

    Warning { event: WarningEvent },

    Error { event: ErrorEvent },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_timestamped_now() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            event: WarningEvent::new(WarningType::Other, "x"),
        });
        assert!(event.timestamp >= before);
        assert!(event.timestamp <= Instant::now());
    }

    #[test]
    fn error_kind_serializes_with_snake_case_tags() {
        let kind = DiagnosticEventKind::Error {
            event: ErrorEvent::new(ErrorType::ShowFailed, "surface gone"),
        };
        let text = toml::to_string(&kind).expect("serialization should succeed");
        assert!(text.contains("type = \"error\""));
        assert!(text.contains("show_failed"));
    }
}

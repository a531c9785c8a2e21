// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for the banner queue.
//!
//! The queue holds a cheap [`DiagnosticsHandle`] and records into a bounded
//! channel; the owner of the [`DiagnosticsCollector`] drains it into a
//! [`CircularBuffer`] whenever convenient.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, WarningEvent,
};
use crate::error::Result;

/// Channel slots between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 128;

/// Sends diagnostic events to a [`DiagnosticsCollector`].
///
/// Clone freely; sending never blocks and drops the event if the channel is full.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records an emitted lifecycle notification.
    pub fn log_lifecycle(&self, event: &str, message_id: u64, reuse_identifier: Option<&str>) {
        self.send(DiagnosticEventKind::Lifecycle {
            event: event.to_string(),
            message_id,
            reuse_identifier: reuse_identifier.map(str::to_string),
        });
    }

    pub fn log_warning(&self, event: WarningEvent) {
        self.send(DiagnosticEventKind::Warning { event });
    }

    pub fn log_error(&self, event: ErrorEvent) {
        self.send(DiagnosticEventKind::Error { event });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Counts per event category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticsSummary {
    pub lifecycle: usize,
    pub warnings: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
struct DiagnosticReport<'a> {
    started_at: String,
    duration_ms: u64,
    events: Vec<ReportEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    offset_ms: u64,
    kind: &'a DiagnosticEventKind,
}

/// Stores queue diagnostics in a bounded history.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every queued event into the history.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn started_at_utc(&self) -> DateTime<Utc> {
        self.started_at_utc
    }

    #[must_use]
    pub fn collection_duration(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    pub fn summary(&self) -> DiagnosticsSummary {
        self.buffer
            .iter()
            .fold(DiagnosticsSummary::default(), |mut summary, event| {
                match event.kind {
                    DiagnosticEventKind::Lifecycle { .. } => summary.lifecycle += 1,
                    DiagnosticEventKind::Warning { .. } => summary.warnings += 1,
                    DiagnosticEventKind::Error { .. } => summary.errors += 1,
                }
                summary
            })
    }

    /// Renders the stored history as a TOML report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if serialization fails.
    #[allow(clippy::cast_possible_truncation)] // millisecond offsets fit in u64
    pub fn export_toml(&self) -> Result<String> {
        let report = DiagnosticReport {
            started_at: self.started_at_utc.to_rfc3339(),
            duration_ms: self.started_at.elapsed().as_millis() as u64,
            events: self
                .buffer
                .iter()
                .map(|event| ReportEntry {
                    offset_ms: event
                        .timestamp
                        .saturating_duration_since(self.started_at)
                        .as_millis() as u64,
                    kind: &event.kind,
                })
                .collect(),
        };
        Ok(toml::to_string_pretty(&report)?)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

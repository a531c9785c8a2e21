// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the banner queue.
//!
//! The queue reports lifecycle notifications and every failure it recovered
//! from (surface errors, panicking observers, stale signals) to an optional
//! [`DiagnosticsHandle`]. A [`DiagnosticsCollector`] keeps the most recent
//! events in a memory-bounded [`CircularBuffer`] and can export them as TOML.

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle, DiagnosticsSummary};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, WarningEvent, WarningType,
};

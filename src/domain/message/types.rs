// SPDX-License-Identifier: MPL-2.0
//! Value types carried by a [`Message`](super::Message).

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// MessageId
// =============================================================================

/// Process-unique identity of a banner.
///
/// Allocated once per constructed [`Message`](super::Message). A replacement that
/// shares a reuse identifier with a queued or showing banner takes over that
/// banner's id, so the surface and observers see one logical banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    /// Allocates a fresh id.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// MessageType
// =============================================================================

/// Kind of banner.
///
/// `Notification` is a defined variant without distinct behavior: the queue and
/// the bundled surfaces treat it exactly like the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageType {
    /// Something went wrong.
    #[default]
    Error,
    /// Neutral information.
    Notification,
    /// An operation completed.
    Success,
}

impl MessageType {
    /// Short lowercase label, also accepted by [`FromStr`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MessageType::Error => "error",
            MessageType::Notification => "notification",
            MessageType::Success => "success",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(MessageType::Error),
            "notification" | "info" => Ok(MessageType::Notification),
            "success" => Ok(MessageType::Success),
            other => Err(format!("unknown message type '{other}'")),
        }
    }
}

// =============================================================================
// Style
// =============================================================================

/// RGBA colour, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    /// Opaque colour from RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Font and colour overrides for a banner.
///
/// Pass-through data for the surface; the queue never reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub title_font: Option<String>,
    pub detail_font: Option<String>,
    pub title_colour: Option<Colour>,
    pub detail_colour: Option<Colour>,
}

// SPDX-License-Identifier: MPL-2.0
//! Message newtypes.

use std::time::Duration;

// =============================================================================
// HideDelay
// =============================================================================

/// How long a banner stays visible before it hides on its own.
///
/// A zero delay means "manual": the banner stays until it is explicitly hidden.
/// Negative and non-finite second counts are normalized to manual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HideDelay(Duration);

impl HideDelay {
    /// Never hides on its own.
    pub const MANUAL: Self = Self(Duration::ZERO);

    /// Creates a delay from a number of seconds.
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Duration::try_from_secs_f64(secs).map_or(Self::MANUAL, Self)
        } else {
            Self::MANUAL
        }
    }

    /// Creates a delay from a duration (zero is manual).
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    /// Returns true if no auto-hide timer should be armed.
    #[must_use]
    pub fn is_manual(self) -> bool {
        self.0.is_zero()
    }

    /// Returns the timer delay, or `None` for manual banners.
    #[must_use]
    pub fn as_duration(self) -> Option<Duration> {
        (!self.is_manual()).then_some(self.0)
    }

    /// Returns the delay in seconds (0.0 for manual).
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

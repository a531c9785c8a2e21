// SPDX-License-Identifier: MPL-2.0
//! Queue states and operation outcomes.

/// Observable state of a [`BannerQueue`](super::BannerQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueState {
    /// Nothing showing and nothing waiting to be processed.
    #[default]
    Idle,
    /// A banner occupies the surface (appearing or visible).
    Showing,
    /// The banner is hiding and nothing will follow it yet.
    Hiding,
    /// The banner is hiding and another one will be shown once it is gone.
    HidingForNext,
    /// Processing is suspended with banners waiting.
    Paused,
}

impl QueueState {
    /// Returns true if a banner occupies the surface.
    #[must_use]
    pub fn is_occupied(self) -> bool {
        matches!(self, Self::Showing | Self::Hiding | Self::HidingForNext)
    }

    /// Returns true if a hide transition is in flight.
    #[must_use]
    pub fn is_hiding(self) -> bool {
        matches!(self, Self::Hiding | Self::HidingForNext)
    }
}

/// What [`BannerQueue::enqueue`](super::BannerQueue::enqueue) did with a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// Shown straight away.
    Presented,
    /// Appended to the pending queue at `position`.
    Queued { position: usize },
    /// Replaced the pending banner with the same reuse identifier in place.
    Replaced { position: usize },
    /// Replaced the content of the banner currently showing.
    ReplacedCurrent,
    /// Replaced the bypassing banner waiting for the current one to hide.
    ReplacedBypass,
    /// The surface refused to show it; the queue moved on.
    ShowFailed,
}

/// Progress of the banner in the display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    /// `show` was called; `DidShow` not yet emitted. Holds a hide requested meanwhile.
    Appearing { hide_requested: Option<bool> },
    /// `DidShow` emitted.
    Visible,
    /// `WillHide` emitted; waiting for the surface.
    Hiding,
}

impl Stage {
    pub(crate) fn is_hiding(self) -> bool {
        matches!(self, Stage::Hiding)
    }
}

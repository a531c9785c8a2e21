// SPDX-License-Identifier: MPL-2.0
//! Display surface port definition.
//!
//! The queue drives exactly one [`DisplaySurface`]: it calls `show` once per
//! banner it presents and `hide` once to end it. Renderers with animated
//! transitions return [`Completion::Deferred`] and later report the finished
//! transition through `BannerQueue::show_completed` / `hide_completed`.

use crate::domain::message::Message;
use std::fmt;

// =============================================================================
// SurfaceError
// =============================================================================

/// Errors a surface can report for a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface has nowhere to render (no window, detached view, ...).
    Unavailable,

    /// The surface refused this particular banner.
    Rejected(String),

    /// Any other rendering failure.
    Other(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable => write!(f, "Display surface unavailable"),
            SurfaceError::Rejected(msg) => write!(f, "Banner rejected: {msg}"),
            SurfaceError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

// =============================================================================
// Completion
// =============================================================================

/// How a transition finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The transition is already over.
    Immediate,
    /// The transition is running; completion will be reported with the banner's id.
    Deferred,
}

// =============================================================================
// DisplaySurface
// =============================================================================

/// Something capable of rendering one banner at a time.
pub trait DisplaySurface {
    /// Starts presenting `message`.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner cannot be shown; the queue then skips it.
    fn show(&mut self, message: &Message, animated: bool) -> Result<Completion, SurfaceError>;

    /// Starts dismissing whatever is presented.
    ///
    /// # Errors
    ///
    /// Returns an error if dismissal failed; the queue treats the banner as gone.
    fn hide(&mut self, animated: bool) -> Result<Completion, SurfaceError>;

    /// Returns true while a banner is on screen.
    fn is_showing(&self) -> bool;

    /// Replaces the content of the presented banner in place.
    ///
    /// Called when a submission with the same reuse identifier lands on the
    /// banner that is currently showing.
    ///
    /// # Errors
    ///
    /// Returns an error if the content could not be updated.
    fn refresh(&mut self, message: &Message) -> Result<(), SurfaceError> {
        let _ = message;
        Ok(())
    }
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn show(&mut self, message: &Message, animated: bool) -> Result<Completion, SurfaceError> {
        (**self).show(message, animated)
    }

    fn hide(&mut self, animated: bool) -> Result<Completion, SurfaceError> {
        (**self).hide(animated)
    }

    fn is_showing(&self) -> bool {
        (**self).is_showing()
    }

    fn refresh(&mut self, message: &Message) -> Result<(), SurfaceError> {
        (**self).refresh(message)
    }
}

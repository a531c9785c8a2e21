// SPDX-License-Identifier: MPL-2.0
//! Auto-hide timer bookkeeping.
//!
//! The queue never sleeps itself. It arms a [`TimerSlot`] and whoever drives the
//! queue (the tokio service, or a host calling `tick`) reports the timer back by
//! its [`TimerToken`]. Every arm or cancel bumps the slot's generation, so a
//! token from a cancelled timer that fires late no longer matches and is ignored.

use crate::domain::message::{HideDelay, MessageId};
use std::time::{Duration, Instant};

/// Identifies one arming of the auto-hide timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// An armed auto-hide timer for the showing banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoHideTimer {
    token: TimerToken,
    message: MessageId,
    delay: Duration,
    deadline: Instant,
}

impl AutoHideTimer {
    #[must_use]
    pub fn token(&self) -> TimerToken {
        self.token
    }

    /// The banner this timer will hide.
    #[must_use]
    pub fn message(&self) -> MessageId {
        self.message
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns true once `now` has reached the deadline.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Holds at most one armed [`AutoHideTimer`].
#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<AutoHideTimer>,
    generation: u64,
}

impl TimerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer for `message`, replacing any armed one.
    ///
    /// Manual delays only cancel; `None` is returned and nothing is armed.
    /// A delay whose deadline does not fit in an [`Instant`] is treated as manual.
    pub fn arm(&mut self, message: MessageId, delay: HideDelay, now: Instant) -> Option<TimerToken> {
        self.cancel();
        let delay = delay.as_duration()?;
        let Some(deadline) = now.checked_add(delay) else {
            log::debug!("hide delay {delay:?} of banner {message} is out of range, not arming");
            return None;
        };
        let token = self.bump();
        self.armed = Some(AutoHideTimer {
            token,
            message,
            delay,
            deadline,
        });
        Some(token)
    }

    /// Disarms the timer. Returns the token that was armed, if any.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        let cancelled = self.armed.take().map(|timer| timer.token);
        if cancelled.is_some() {
            self.bump();
        }
        cancelled
    }

    /// Consumes a fired timer.
    ///
    /// Returns the banner to hide only if `token` is the armed one; stale or
    /// already cancelled tokens yield `None`.
    pub fn fire(&mut self, token: TimerToken) -> Option<MessageId> {
        match self.armed {
            Some(timer) if timer.token == token => {
                self.armed = None;
                Some(timer.message)
            }
            _ => None,
        }
    }

    /// Returns the armed token if its deadline has passed.
    #[must_use]
    pub fn due(&self, now: Instant) -> Option<TimerToken> {
        self.armed
            .filter(|timer| timer.is_due(now))
            .map(|timer| timer.token)
    }

    #[must_use]
    pub fn armed(&self) -> Option<&AutoHideTimer> {
        self.armed.as_ref()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    fn bump(&mut self) -> TimerToken {
        self.generation += 1;
        TimerToken(self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> MessageId {
        MessageId::next()
    }

    #[test]
    fn manual_delay_arms_nothing() {
        let mut slot = TimerSlot::new();
        assert!(slot.arm(id(), HideDelay::MANUAL, Instant::now()).is_none());
        assert!(!slot.is_armed());
    }

    #[test]
    fn unrepresentable_deadline_arms_nothing() {
        let mut slot = TimerSlot::new();
        let now = Instant::now();
        slot.arm(id(), HideDelay::from_secs_f64(1.0), now).unwrap();

        assert!(slot
            .arm(id(), HideDelay::from_duration(Duration::MAX), now)
            .is_none());
        assert!(!slot.is_armed());
    }

    #[test]
    fn timer_is_due_only_after_deadline() {
        let mut slot = TimerSlot::new();
        let start = Instant::now();
        let token = slot
            .arm(id(), HideDelay::from_secs_f64(2.0), start)
            .unwrap();

        assert!(slot.due(start).is_none());
        assert!(slot.due(start + Duration::from_millis(1999)).is_none());
        assert_eq!(slot.due(start + Duration::from_secs(2)), Some(token));
    }

    #[test]
    fn firing_the_armed_token_yields_the_message_once() {
        let mut slot = TimerSlot::new();
        let message = id();
        let token = slot
            .arm(message, HideDelay::from_secs_f64(1.0), Instant::now())
            .unwrap();

        assert_eq!(slot.fire(token), Some(message));
        assert_eq!(slot.fire(token), None);
        assert!(!slot.is_armed());
    }

    #[test]
    fn cancelled_token_is_a_no_op_when_it_fires() {
        let mut slot = TimerSlot::new();
        let token = slot
            .arm(id(), HideDelay::from_secs_f64(1.0), Instant::now())
            .unwrap();

        assert_eq!(slot.cancel(), Some(token));
        assert_eq!(slot.fire(token), None);
    }

    #[test]
    fn rearming_invalidates_the_previous_token() {
        let mut slot = TimerSlot::new();
        let message = id();
        let first = slot
            .arm(message, HideDelay::from_secs_f64(1.0), Instant::now())
            .unwrap();
        let second = slot
            .arm(message, HideDelay::from_secs_f64(5.0), Instant::now())
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(slot.fire(first), None);
        assert_eq!(slot.armed().map(AutoHideTimer::delay), Some(Duration::from_secs(5)));
        assert_eq!(slot.fire(second), Some(message));
    }

    #[test]
    fn token_from_cancelled_arm_never_matches_a_later_arm() {
        let mut slot = TimerSlot::new();
        let stale = slot
            .arm(id(), HideDelay::from_secs_f64(1.0), Instant::now())
            .unwrap();
        slot.cancel();
        let fresh = slot
            .arm(id(), HideDelay::from_secs_f64(1.0), Instant::now())
            .unwrap();

        assert_ne!(stale, fresh);
        assert_eq!(slot.fire(stale), None);
        assert!(slot.is_armed());
    }
}

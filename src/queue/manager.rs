// SPDX-License-Identifier: MPL-2.0
//! Banner lifecycle management.
//!
//! The [`BannerQueue`] owns the single display slot, the FIFO of pending
//! banners and the auto-hide timer, and drives one [`DisplaySurface`]. It is a
//! plain state machine: every method runs to completion on the caller's thread
//! and nothing inside sleeps. Hosts with animated surfaces report finished
//! transitions through [`show_completed`](BannerQueue::show_completed) and
//! [`hide_completed`](BannerQueue::hide_completed); timers are reported through
//! [`fire_timer`](BannerQueue::fire_timer) or [`tick`](BannerQueue::tick).
//! [`BannerService`](crate::runtime::BannerService) does both on a tokio task.

use super::events::{BannerEvent, EventBus, EventKind, SubscriptionId};
use super::state::{Enqueued, QueueState, Stage};
use super::timer::{AutoHideTimer, TimerSlot, TimerToken};
use crate::application::port::{Completion, DisplaySurface};
use crate::config::Config;
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType};
use crate::domain::message::{Message, MessageId};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tokio::sync::mpsc;

/// The banner occupying the surface.
#[derive(Debug)]
struct Slot {
    message: Message,
    stage: Stage,
}

/// A bypassing banner waiting for the current one to finish hiding.
#[derive(Debug)]
struct Interrupt {
    message: Message,
    animated: bool,
}

/// Serializes banners through a single display slot.
#[derive(Debug)]
pub struct BannerQueue<S> {
    surface: S,
    /// Banners waiting for the slot (oldest first).
    pending: VecDeque<Message>,
    slot: Option<Slot>,
    interrupt: Option<Interrupt>,
    running: bool,
    /// Animation flag for transitions the queue starts itself.
    animated: bool,
    timer: TimerSlot,
    events: EventBus,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<S: DisplaySurface> BannerQueue<S> {
    /// Creates a running queue that animates its own transitions.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            pending: VecDeque::new(),
            slot: None,
            interrupt: None,
            running: true,
            animated: true,
            timer: TimerSlot::new(),
            events: EventBus::new(),
            diagnostics: None,
        }
    }

    /// Creates a queue honoring `autostart` and `animate_transitions`.
    pub fn with_config(surface: S, config: &Config) -> Self {
        let mut queue = Self::new(surface);
        queue.running = config.autostart();
        queue.animated = config.animate_transitions();
        queue
    }

    /// Sets the diagnostics handle for recording lifecycle events and failures.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Sets whether queue-driven transitions (advance, auto-hide) animate.
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&BannerEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(observer)
    }

    pub fn subscribe_channel(
        &mut self,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<BannerEvent>) {
        self.events.subscribe_channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // =========================================================================
    // Submissions
    // =========================================================================

    /// Submits a banner in FIFO order.
    ///
    /// A banner with the same reuse identifier as the showing banner replaces
    /// its content. One matching the bypassing banner waiting to be shown, or
    /// a pending banner, replaces that entry in place. Otherwise it is shown
    /// at once if the slot is free and the queue is running, or appended to
    /// the pending queue.
    pub fn enqueue(&mut self, message: Message) -> Enqueued {
        let matches_current = self.slot.as_ref().is_some_and(|slot| {
            !slot.stage.is_hiding() && slot.message.is_same_banner(&message)
        });
        if matches_current {
            self.replace_current(message);
            return Enqueued::ReplacedCurrent;
        }

        if let Some(interrupt) = self
            .interrupt
            .as_mut()
            .filter(|interrupt| interrupt.message.is_same_banner(&message))
        {
            interrupt.message = message.adopting(interrupt.message.id());
            let replacement = interrupt.message.clone();
            self.report_replaced(&replacement, "bypassing");
            return Enqueued::ReplacedBypass;
        }

        if let Some(position) = self
            .pending
            .iter()
            .position(|queued| queued.is_same_banner(&message))
        {
            let replacement = message.adopting(self.pending[position].id());
            self.report_replaced(&replacement, "pending");
            self.pending[position] = replacement;
            return Enqueued::Replaced { position };
        }

        if !self.running || self.slot.is_some() {
            self.pending.push_back(message);
            return Enqueued::Queued {
                position: self.pending.len() - 1,
            };
        }

        if self.present(message, self.animated) {
            Enqueued::Presented
        } else {
            self.advance();
            Enqueued::ShowFailed
        }
    }

    /// Shows `message` right away, bypassing the pending queue.
    ///
    /// A banner already on screen is hidden first (its timer cancelled);
    /// pending banners are left untouched.
    pub fn show_animated(&mut self, message: Message, animated: bool) {
        let Some(stage) = self.slot.as_ref().map(|slot| slot.stage) else {
            if !self.present(message, animated) {
                self.advance();
            }
            return;
        };

        if let Some(previous) = self.interrupt.replace(Interrupt { message, animated }) {
            self.report_warning(
                WarningType::InterruptSuperseded,
                format!("bypassing banner {} superseded before showing", previous.message.id()),
            );
        }
        if !stage.is_hiding() {
            self.hide_animated(animated);
        }
    }

    /// Hides the showing banner.
    ///
    /// Returns false (and does nothing) if no banner is showing or it is
    /// already hiding. A hide requested while the banner is still appearing
    /// runs as soon as it has appeared.
    pub fn hide_animated(&mut self, animated: bool) -> bool {
        match self.slot.as_ref().map(|slot| slot.stage) {
            None => {
                log::debug!("hide requested with no banner showing");
                false
            }
            Some(Stage::Hiding) => false,
            Some(Stage::Appearing { .. }) => {
                if let Some(slot) = self.slot.as_mut() {
                    slot.stage = Stage::Appearing {
                        hide_requested: Some(animated),
                    };
                }
                true
            }
            Some(Stage::Visible) => {
                self.begin_hide(animated);
                true
            }
        }
    }

    /// Arms the auto-hide timer for the visible banner using its duration.
    ///
    /// Re-arming cancels the previous timer. Manual banners (zero duration)
    /// get no timer. Returns the armed token.
    pub fn start_hide_timer(&mut self) -> Option<TimerToken> {
        let slot = self.slot.as_ref()?;
        if slot.stage != Stage::Visible {
            return None;
        }
        self.timer
            .arm(slot.message.id(), slot.message.duration(), Instant::now())
    }

    /// Reports a tap on the visible banner.
    ///
    /// Emits `Tapped` and then runs the banner's tap handler. Returns false if
    /// no banner is visible.
    pub fn tap(&mut self) -> bool {
        let Some(message) = self
            .slot
            .as_ref()
            .filter(|slot| slot.stage == Stage::Visible)
            .map(|slot| slot.message.clone())
        else {
            return false;
        };

        self.emit(EventKind::Tapped, &message);
        if panic::catch_unwind(AssertUnwindSafe(|| message.invoke_tap_handler())).is_err() {
            self.report_error(
                ErrorType::TapHandlerPanicked,
                format!("tap handler of banner {} panicked", message.id()),
            );
        }
        true
    }

    // =========================================================================
    // Queue control
    // =========================================================================

    /// Resumes processing and shows the next pending banner if the slot is free.
    pub fn start_queue(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        if self.slot.is_none() {
            self.advance();
        }
    }

    /// Stops advancing to pending banners.
    ///
    /// The showing banner is left alone and still auto-hides.
    pub fn pause_queue(&mut self) {
        self.running = false;
    }

    /// Drops every pending banner and hides the current one without animation.
    ///
    /// Cancels the timer and any bypassing banner. The running flag is kept.
    pub fn hide_and_reset(&mut self) {
        self.timer.cancel();
        self.pending.clear();
        if let Some(dropped) = self.interrupt.take() {
            log::debug!("reset dropped bypassing banner {}", dropped.message.id());
        }

        if let Some(slot) = self.slot.take() {
            if !slot.stage.is_hiding() {
                self.emit(EventKind::WillHide, &slot.message);
            }
            if let Err(err) = self.surface.hide(false) {
                self.report_error(
                    ErrorType::HideFailed,
                    format!("forced hide of banner {} failed: {err}", slot.message.id()),
                );
            }
            self.emit(EventKind::DidHide, &slot.message);
        }
    }

    // =========================================================================
    // Signals from the host
    // =========================================================================

    /// Reports that the deferred show of banner `id` finished.
    pub fn show_completed(&mut self, id: MessageId) -> bool {
        let appearing = self.slot.as_ref().is_some_and(|slot| {
            slot.message.id() == id && matches!(slot.stage, Stage::Appearing { .. })
        });
        if !appearing {
            self.report_warning(
                WarningType::StaleSignal,
                format!("ignored show completion for banner {id}"),
            );
            return false;
        }
        self.finish_show();
        true
    }

    /// Reports that the deferred hide of banner `id` finished.
    pub fn hide_completed(&mut self, id: MessageId) -> bool {
        let hiding = self
            .slot
            .as_ref()
            .is_some_and(|slot| slot.message.id() == id && slot.stage.is_hiding());
        if !hiding {
            self.report_warning(
                WarningType::StaleSignal,
                format!("ignored hide completion for banner {id}"),
            );
            return false;
        }
        self.finish_hide();
        true
    }

    /// Reports that the timer armed as `token` went off.
    ///
    /// Cancelled or superseded tokens are ignored.
    pub fn fire_timer(&mut self, token: TimerToken) -> bool {
        let Some(id) = self.timer.fire(token) else {
            log::debug!("ignored stale hide timer {token:?}");
            return false;
        };
        let visible = self
            .slot
            .as_ref()
            .is_some_and(|slot| slot.message.id() == id && slot.stage == Stage::Visible);
        if !visible {
            return false;
        }
        self.begin_hide(self.animated);
        true
    }

    /// Fires the armed timer if its deadline is at or before `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.due(now) {
            Some(token) => self.fire_timer(token),
            None => false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> QueueState {
        match &self.slot {
            Some(slot) if slot.stage.is_hiding() => {
                if self.interrupt.is_some() || (self.running && !self.pending.is_empty()) {
                    QueueState::HidingForNext
                } else {
                    QueueState::Hiding
                }
            }
            Some(_) => QueueState::Showing,
            None if !self.running && !self.pending.is_empty() => QueueState::Paused,
            None => QueueState::Idle,
        }
    }

    /// The banner occupying the surface, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Message> {
        self.slot.as_ref().map(|slot| &slot.message)
    }

    /// Pending banners, next first.
    pub fn pending(&self) -> impl Iterator<Item = &Message> {
        self.pending.iter()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn armed_timer(&self) -> Option<&AutoHideTimer> {
        self.timer.armed()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Fills the free slot from the bypassing banner or, when running, the
    /// head of the pending queue. Skips banners the surface refuses.
    fn advance(&mut self) {
        while self.slot.is_none() {
            let (message, animated) = if let Some(interrupt) = self.interrupt.take() {
                (interrupt.message, interrupt.animated)
            } else if self.running {
                match self.pending.pop_front() {
                    Some(message) => (message, self.animated),
                    None => return,
                }
            } else {
                return;
            };
            self.present(message, animated);
        }
    }

    /// Puts `message` in the free slot and asks the surface to show it.
    ///
    /// Returns false if the surface refused it; the slot is empty again.
    fn present(&mut self, message: Message, animated: bool) -> bool {
        self.timer.cancel();
        self.slot = Some(Slot {
            message: message.clone(),
            stage: Stage::Appearing {
                hide_requested: None,
            },
        });
        self.emit(EventKind::WillShow, &message);

        match self.surface.show(&message, animated) {
            Ok(Completion::Immediate) => {
                self.finish_show();
                true
            }
            Ok(Completion::Deferred) => true,
            Err(err) => {
                self.report_error(
                    ErrorType::ShowFailed,
                    format!("surface failed to show banner {}: {err}", message.id()),
                );
                self.slot = None;
                self.emit(EventKind::DidHide, &message);
                false
            }
        }
    }

    fn finish_show(&mut self) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        let Stage::Appearing { hide_requested } = slot.stage else {
            return;
        };
        slot.stage = Stage::Visible;
        let message = slot.message.clone();

        self.emit(EventKind::DidShow, &message);
        match hide_requested {
            Some(animated) => self.begin_hide(animated),
            None => {
                self.start_hide_timer();
            }
        }
    }

    fn begin_hide(&mut self, animated: bool) {
        self.timer.cancel();
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        slot.stage = Stage::Hiding;
        let message = slot.message.clone();

        self.emit(EventKind::WillHide, &message);
        match self.surface.hide(animated) {
            Ok(Completion::Immediate) => self.finish_hide(),
            Ok(Completion::Deferred) => {}
            Err(err) => {
                self.report_error(
                    ErrorType::HideFailed,
                    format!("surface failed to hide banner {}: {err}", message.id()),
                );
                self.finish_hide();
            }
        }
    }

    fn finish_hide(&mut self) {
        let Some(slot) = self.slot.take() else {
            return;
        };
        self.emit(EventKind::DidHide, &slot.message);
        self.advance();
    }

    fn replace_current(&mut self, message: Message) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        let id = slot.message.id();
        slot.message = message.adopting(id);
        let visible = slot.stage == Stage::Visible;
        let replacement = slot.message.clone();
        let refreshed = self.surface.refresh(&replacement);

        self.report_replaced(&replacement, "showing");
        if let Err(err) = refreshed {
            self.report_error(
                ErrorType::RefreshFailed,
                format!("surface failed to refresh banner {id}: {err}"),
            );
        }
        if visible {
            self.start_hide_timer();
        }
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    fn emit(&mut self, kind: EventKind, message: &Message) {
        log::debug!("{} banner {}", kind.label(), message.id());
        if let Some(handle) = &self.diagnostics {
            handle.log_lifecycle(
                kind.label(),
                message.id().value(),
                message.reuse_identifier(),
            );
        }
        let failures = self.events.emit(kind, message);
        if failures > 0 {
            self.report_error(
                ErrorType::ObserverPanicked,
                format!("{failures} observer(s) panicked on {}", kind.label()),
            );
        }
    }

    /// Records a reuse-identifier replacement. Part of normal operation, so
    /// it goes to the lifecycle history rather than the warnings.
    fn report_replaced(&self, replacement: &Message, role: &str) {
        log::debug!("replaced {role} banner {}", replacement.id());
        if let Some(handle) = &self.diagnostics {
            handle.log_lifecycle(
                "replaced",
                replacement.id().value(),
                replacement.reuse_identifier(),
            );
        }
    }

    fn report_warning(&self, warning_type: WarningType, message: String) {
        log::debug!("{message}");
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(WarningEvent::new(warning_type, message));
        }
    }

    fn report_error(&self, error_type: ErrorType, message: String) {
        log::warn!("{message}");
        if let Some(handle) = &self.diagnostics {
            handle.log_error(ErrorEvent::new(error_type, message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::domain::message::MessageType;
    use crate::infrastructure::{RecordingSurface, SurfaceCall};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Journal = Arc<Mutex<Vec<String>>>;

    fn queue() -> (BannerQueue<RecordingSurface>, Journal) {
        queue_with(RecordingSurface::new())
    }

    fn queue_with(surface: RecordingSurface) -> (BannerQueue<RecordingSurface>, Journal) {
        let mut queue = BannerQueue::new(surface);
        let journal: Journal = Arc::default();
        let sink = Arc::clone(&journal);
        queue.subscribe(move |event| {
            sink.lock().unwrap().push(format!(
                "{}:{}",
                event.kind().label(),
                event.message().title()
            ));
        });
        (queue, journal)
    }

    fn taken(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.lock().unwrap())
    }

    fn banner(title: &str) -> Message {
        Message::with_title(title, MessageType::Notification).unwrap()
    }

    fn banner_with_id(title: &str, id: &str) -> Message {
        Message::with_title_and_identifier(title, MessageType::Error, id).unwrap()
    }

    fn timed(title: &str, secs: f64) -> Message {
        Message::new(title, None, MessageType::Success, None, secs).unwrap()
    }

    #[test]
    fn new_queue_is_idle_and_running() {
        let (queue, _) = queue();
        assert_eq!(queue.state(), QueueState::Idle);
        assert!(queue.is_running());
        assert!(queue.current().is_none());
        assert_eq!(queue.pending_len(), 0);
    }

    #[test]
    fn enqueue_on_idle_queue_shows_immediately() {
        let (mut queue, journal) = queue();
        assert_eq!(queue.enqueue(banner("A")), Enqueued::Presented);

        assert_eq!(queue.state(), QueueState::Showing);
        assert_eq!(queue.current().map(Message::title), Some("A"));
        assert_eq!(taken(&journal), vec!["will-show:A", "did-show:A"]);
        assert_eq!(queue.surface().show_count(), 1);
    }

    #[test]
    fn banners_show_in_fifo_order() {
        let (mut queue, journal) = queue();
        queue.enqueue(banner_with_id("A", "a"));
        assert_eq!(
            queue.enqueue(banner_with_id("B", "b")),
            Enqueued::Queued { position: 0 }
        );
        assert_eq!(
            queue.enqueue(banner_with_id("C", "c")),
            Enqueued::Queued { position: 1 }
        );

        assert!(queue.hide_animated(true));
        assert!(queue.hide_animated(false));
        assert!(queue.hide_animated(true));

        assert_eq!(
            taken(&journal),
            vec![
                "will-show:A",
                "did-show:A",
                "will-hide:A",
                "did-hide:A",
                "will-show:B",
                "did-show:B",
                "will-hide:B",
                "did-hide:B",
                "will-show:C",
                "did-show:C",
                "will-hide:C",
                "did-hide:C",
            ]
        );
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn same_identifier_before_showing_keeps_latest_content_and_position() {
        let (mut queue, journal) = queue();
        queue.enqueue(banner("Busy"));
        queue.enqueue(banner_with_id("A", "x"));
        queue.enqueue(banner_with_id("Other", "y"));
        let first_id = queue.pending().next().map(Message::id);

        assert_eq!(
            queue.enqueue(banner_with_id("B", "x")),
            Enqueued::Replaced { position: 0 }
        );
        assert_eq!(queue.pending_len(), 2);
        let head = queue.pending().next().unwrap();
        assert_eq!(head.title(), "B");
        assert_eq!(Some(head.id()), first_id);

        taken(&journal);
        queue.hide_animated(false);
        let shows: Vec<String> = taken(&journal)
            .into_iter()
            .filter(|entry| entry.starts_with("will-show"))
            .collect();
        assert_eq!(shows, vec!["will-show:B"]);
    }

    #[test]
    fn same_identifier_as_showing_banner_replaces_its_content() {
        let (mut queue, journal) = queue();
        queue.enqueue(banner_with_id("Offline", "net"));
        let shown_id = queue.current().unwrap().id();
        taken(&journal);

        assert_eq!(
            queue.enqueue(banner_with_id("Still offline", "net")),
            Enqueued::ReplacedCurrent
        );

        assert!(taken(&journal).is_empty());
        assert_eq!(queue.pending_len(), 0);
        let current = queue.current().unwrap();
        assert_eq!(current.title(), "Still offline");
        assert_eq!(current.id(), shown_id);
        assert!(queue
            .surface()
            .calls()
            .iter()
            .any(|call| matches!(call, SurfaceCall::Refresh { title, .. } if title == "Still offline")));
    }

    #[test]
    fn replacing_showing_banner_rearms_timer_with_new_duration() {
        let (mut queue, _) = queue();
        let first = Message::new("Saving", None, MessageType::Notification, Some("save"), 1.0)
            .unwrap();
        queue.enqueue(first);
        let before = queue.armed_timer().map(AutoHideTimer::token);

        let second = Message::new("Saved", None, MessageType::Success, Some("save"), 5.0)
            .unwrap();
        queue.enqueue(second);

        let timer = queue.armed_timer().copied().unwrap();
        assert_ne!(Some(timer.token()), before);
        assert_eq!(timer.delay(), Duration::from_secs(5));
    }

    #[test]
    fn blank_identifiers_are_never_deduplicated() {
        let (mut queue, _) = queue();
        queue.enqueue(banner("Busy"));
        queue.enqueue(banner("Same"));
        queue.enqueue(banner("Same"));
        assert_eq!(queue.pending_len(), 2);
    }

    #[test]
    fn paused_queue_accumulates_without_showing() {
        let (mut queue, journal) = queue();
        queue.pause_queue();
        queue.enqueue(banner_with_id("A", "a"));
        queue.enqueue(banner_with_id("B", "b"));
        queue.enqueue(banner_with_id("C", "c"));

        assert_eq!(queue.state(), QueueState::Paused);
        assert_eq!(queue.surface().show_count(), 0);
        assert!(taken(&journal).is_empty());

        queue.start_queue();
        queue.hide_animated(false);
        queue.hide_animated(false);

        let shows: Vec<String> = taken(&journal)
            .into_iter()
            .filter(|entry| entry.starts_with("did-show"))
            .collect();
        assert_eq!(shows, vec!["did-show:A", "did-show:B", "did-show:C"]);
    }

    #[test]
    fn pause_leaves_current_banner_and_its_timer_alone() {
        let (mut queue, journal) = queue();
        queue.enqueue(timed("First", 2.0));
        queue.enqueue(timed("Second", 2.0));
        queue.pause_queue();
        taken(&journal);

        assert_eq!(queue.state(), QueueState::Showing);
        assert!(queue.tick(Instant::now() + Duration::from_secs(3)));

        assert_eq!(taken(&journal), vec!["will-hide:First", "did-hide:First"]);
        assert_eq!(queue.state(), QueueState::Paused);
        assert_eq!(queue.pending_len(), 1);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let (mut queue, journal) = queue();
        queue.start_queue();
        queue.start_queue();
        assert!(queue.is_running());
        queue.pause_queue();
        queue.pause_queue();
        assert!(!queue.is_running());
        assert!(taken(&journal).is_empty());
    }

    #[test]
    fn timer_hides_only_after_its_deadline() {
        let (mut queue, journal) = queue();
        queue.enqueue(timed("Saved", 2.0));
        taken(&journal);

        let deadline = queue.armed_timer().unwrap().deadline();
        assert!(!queue.tick(deadline - Duration::from_millis(1)));
        assert_eq!(queue.state(), QueueState::Showing);

        assert!(queue.tick(deadline));
        assert_eq!(taken(&journal), vec!["will-hide:Saved", "did-hide:Saved"]);
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn zero_duration_never_auto_hides() {
        let (mut queue, _) = queue();
        queue.enqueue(timed("Sticky", 0.0));
        assert!(queue.armed_timer().is_none());
        assert!(!queue.tick(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(queue.state(), QueueState::Showing);
    }

    #[test]
    fn manual_hide_cancels_timer_and_stale_token_is_ignored() {
        let (mut queue, journal) = queue();
        queue.enqueue(timed("A", 2.0));
        queue.enqueue(timed("B", 2.0));
        let token = queue.armed_timer().unwrap().token();

        queue.hide_animated(true);
        assert_eq!(queue.current().map(Message::title), Some("B"));
        taken(&journal);

        assert!(!queue.fire_timer(token));
        assert!(taken(&journal).is_empty());
        assert_eq!(queue.current().map(Message::title), Some("B"));
    }

    #[test]
    fn hide_with_nothing_showing_is_a_no_op() {
        let (mut queue, journal) = queue();
        assert!(!queue.hide_animated(true));
        assert!(taken(&journal).is_empty());
        assert_eq!(queue.surface().hide_count(), 0);
    }

    #[test]
    fn show_animated_interrupts_without_touching_pending() {
        let (mut queue, journal) = queue();
        queue.enqueue(banner("Current"));
        queue.enqueue(banner("Waiting"));
        taken(&journal);

        queue.show_animated(banner("Urgent"), true);

        assert_eq!(
            taken(&journal),
            vec![
                "will-hide:Current",
                "did-hide:Current",
                "will-show:Urgent",
                "did-show:Urgent"
            ]
        );
        assert_eq!(queue.pending_len(), 1);
        assert_eq!(queue.pending().next().map(Message::title), Some("Waiting"));

        queue.hide_animated(true);
        assert_eq!(queue.current().map(Message::title), Some("Waiting"));
    }

    #[test]
    fn show_animated_on_paused_idle_queue_still_shows() {
        let (mut queue, _) = queue();
        queue.pause_queue();
        queue.show_animated(banner("Now"), false);
        assert_eq!(queue.current().map(Message::title), Some("Now"));
        assert_eq!(
            queue.surface().calls().first(),
            Some(&SurfaceCall::Show {
                id: queue.current().unwrap().id(),
                title: "Now".to_string(),
                animated: false
            })
        );
    }

    #[test]
    fn deferred_surface_waits_for_completions() {
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.enqueue(timed("A", 1.0));
        queue.enqueue(timed("B", 1.0));
        let a = queue.current().unwrap().id();

        assert_eq!(taken(&journal), vec!["will-show:A"]);
        assert!(queue.armed_timer().is_none());

        assert!(queue.show_completed(a));
        assert_eq!(taken(&journal), vec!["did-show:A"]);
        assert!(queue.armed_timer().is_some());

        assert!(queue.hide_animated(true));
        assert_eq!(queue.state(), QueueState::HidingForNext);
        assert_eq!(taken(&journal), vec!["will-hide:A"]);

        assert!(!queue.show_completed(a));
        assert!(queue.hide_completed(a));
        assert_eq!(taken(&journal), vec!["did-hide:A", "will-show:B"]);
    }

    #[test]
    fn hide_requested_while_appearing_runs_after_did_show() {
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.enqueue(banner("A"));
        let a = queue.current().unwrap().id();

        assert!(queue.hide_animated(true));
        assert_eq!(taken(&journal), vec!["will-show:A"]);

        queue.show_completed(a);
        assert_eq!(taken(&journal), vec!["did-show:A", "will-hide:A"]);
        assert_eq!(queue.state(), QueueState::Hiding);
    }

    #[test]
    fn failed_show_is_skipped_and_queue_advances() {
        let mut collector = DiagnosticsCollector::default();
        let (mut queue, journal) = queue_with(RecordingSurface::new().failing_on("Broken"));
        queue.set_diagnostics(collector.handle());

        queue.pause_queue();
        queue.enqueue(banner("Broken"));
        queue.enqueue(banner("Fine"));
        queue.start_queue();

        assert_eq!(
            taken(&journal),
            vec![
                "will-show:Broken",
                "did-hide:Broken",
                "will-show:Fine",
                "did-show:Fine"
            ]
        );
        assert_eq!(queue.current().map(Message::title), Some("Fine"));

        collector.process_pending();
        assert_eq!(collector.summary().errors, 1);
    }

    #[test]
    fn failed_show_on_direct_enqueue_reports_it() {
        let (mut queue, _) = queue_with(RecordingSurface::new().failing_on("Broken"));
        assert_eq!(queue.enqueue(banner("Broken")), Enqueued::ShowFailed);
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn panicking_observer_does_not_corrupt_state() {
        let (mut queue, journal) = queue();
        queue.subscribe(|_| panic!("observer failure"));
        queue.enqueue(banner("A"));
        queue.enqueue(banner("B"));
        queue.hide_animated(true);

        assert_eq!(queue.current().map(Message::title), Some("B"));
        assert_eq!(taken(&journal).len(), 6);
    }

    #[test]
    fn taps_emit_events_and_invoke_handler_each_time() {
        let taps = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&taps);
        let message = Message::builder()
            .title("Tap")
            .on_tap(move |_| *counter.lock().unwrap() += 1)
            .build()
            .unwrap();

        let (mut queue, journal) = queue();
        assert!(!queue.tap());
        queue.enqueue(message);
        taken(&journal);

        assert!(queue.tap());
        assert!(queue.tap());
        assert_eq!(*taps.lock().unwrap(), 2);
        assert_eq!(taken(&journal), vec!["tapped:Tap", "tapped:Tap"]);
    }

    #[test]
    fn panicking_tap_handler_is_contained() {
        let message = Message::builder()
            .title("Tap")
            .on_tap(|_| panic!("handler failure"))
            .build()
            .unwrap();
        let (mut queue, _) = queue();
        queue.enqueue(message);

        assert!(queue.tap());
        assert_eq!(queue.state(), QueueState::Showing);
    }

    #[test]
    fn hide_and_reset_clears_everything() {
        let (mut queue, journal) = queue();
        queue.enqueue(timed("A", 2.0));
        queue.enqueue(timed("B", 2.0));
        queue.enqueue(timed("C", 2.0));
        taken(&journal);

        queue.hide_and_reset();

        assert_eq!(taken(&journal), vec!["will-hide:A", "did-hide:A"]);
        assert_eq!(queue.state(), QueueState::Idle);
        assert_eq!(queue.pending_len(), 0);
        assert!(queue.armed_timer().is_none());
        assert_eq!(
            queue.surface().calls().last(),
            Some(&SurfaceCall::Hide { animated: false })
        );

        queue.enqueue(banner("Fresh"));
        assert_eq!(queue.current().map(Message::title), Some("Fresh"));
    }

    #[test]
    fn hide_and_reset_during_deferred_hide_ignores_late_completion() {
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.enqueue(banner("A"));
        let a = queue.current().unwrap().id();
        queue.show_completed(a);
        queue.hide_animated(true);
        taken(&journal);

        queue.hide_and_reset();
        assert_eq!(taken(&journal), vec!["did-hide:A"]);
        assert!(!queue.hide_completed(a));
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn out_of_range_duration_shows_without_a_timer() {
        let (mut queue, journal) = queue();
        let huge = Message::new("Long", None, MessageType::Success, None, 1e19).unwrap();

        assert_eq!(queue.enqueue(huge), Enqueued::Presented);
        assert_eq!(taken(&journal), vec!["will-show:Long", "did-show:Long"]);
        assert!(queue.armed_timer().is_none());

        let forever = Message::builder()
            .title("Forever")
            .hide_after(Duration::MAX)
            .build()
            .unwrap();
        queue.show_animated(forever, false);
        assert_eq!(queue.current().map(Message::title), Some("Forever"));
        assert!(queue.armed_timer().is_none());
        assert_eq!(queue.state(), QueueState::Showing);
    }

    #[test]
    fn same_identifier_as_waiting_bypass_replaces_it() {
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.enqueue(banner("A"));
        let a = queue.current().unwrap().id();
        queue.show_completed(a);
        queue.hide_animated(true);

        queue.show_animated(banner_with_id("X1", "x"), true);
        assert_eq!(
            queue.enqueue(banner_with_id("X2", "x")),
            Enqueued::ReplacedBypass
        );
        assert_eq!(queue.pending_len(), 0);

        taken(&journal);
        queue.hide_completed(a);
        assert_eq!(queue.current().map(Message::title), Some("X2"));
        assert_eq!(queue.pending_len(), 0);
        assert_eq!(taken(&journal), vec!["did-hide:A", "will-show:X2"]);
    }

    #[test]
    fn replacements_are_not_counted_as_warnings() {
        let mut collector = DiagnosticsCollector::default();
        let (mut queue, _) = queue();
        queue.set_diagnostics(collector.handle());

        queue.enqueue(banner_with_id("Offline", "net"));
        queue.enqueue(banner_with_id("Still offline", "net"));
        queue.enqueue(banner_with_id("Sync", "sync"));
        queue.enqueue(banner_with_id("Sync again", "sync"));

        collector.process_pending();
        assert_eq!(collector.summary().warnings, 0);
        let replaced = collector
            .iter()
            .filter(|entry| {
                matches!(
                    &entry.kind,
                    DiagnosticEventKind::Lifecycle { event, .. } if event == "replaced"
                )
            })
            .count();
        assert_eq!(replaced, 2);
    }

    #[test]
    fn failed_hide_is_treated_as_completed() {
        let mut collector = DiagnosticsCollector::default();
        let (mut queue, journal) = queue_with(RecordingSurface::new().failing_hides());
        queue.set_diagnostics(collector.handle());
        queue.enqueue(banner("A"));
        queue.enqueue(banner("B"));
        taken(&journal);

        assert!(queue.hide_animated(true));

        assert_eq!(
            taken(&journal),
            vec!["will-hide:A", "did-hide:A", "will-show:B", "did-show:B"]
        );
        assert_eq!(queue.current().map(Message::title), Some("B"));
        collector.process_pending();
        assert_eq!(collector.summary().errors, 1);
    }

    #[test]
    fn second_bypass_supersedes_the_first() {
        let mut collector = DiagnosticsCollector::default();
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.set_diagnostics(collector.handle());
        queue.enqueue(banner("A"));
        let a = queue.current().unwrap().id();
        queue.show_completed(a);
        queue.hide_animated(true);

        queue.show_animated(banner("First"), true);
        queue.show_animated(banner("Second"), true);
        assert_eq!(queue.state(), QueueState::HidingForNext);

        taken(&journal);
        queue.hide_completed(a);
        assert_eq!(taken(&journal), vec!["did-hide:A", "will-show:Second"]);
        assert_eq!(queue.surface().journal().shown_titles(), vec!["A", "Second"]);

        collector.process_pending();
        assert_eq!(collector.summary().warnings, 1);
    }

    #[test]
    fn bypass_during_deferred_hide_waits_for_it_and_skips_pending() {
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.enqueue(banner("A"));
        let a = queue.current().unwrap().id();
        queue.show_completed(a);
        queue.enqueue(banner("Waiting"));
        assert!(queue.hide_animated(true));
        taken(&journal);

        queue.show_animated(banner("Urgent"), true);
        assert!(taken(&journal).is_empty());
        assert_eq!(queue.surface().hide_count(), 1);

        queue.hide_completed(a);
        assert_eq!(taken(&journal), vec!["did-hide:A", "will-show:Urgent"]);
        assert_eq!(queue.pending().next().map(Message::title), Some("Waiting"));
    }

    #[test]
    fn hide_and_reset_while_appearing_ignores_late_show_completion() {
        let (mut queue, journal) = queue_with(RecordingSurface::deferred());
        queue.enqueue(banner("A"));
        let a = queue.current().unwrap().id();
        taken(&journal);

        queue.hide_and_reset();
        assert_eq!(taken(&journal), vec!["will-hide:A", "did-hide:A"]);

        assert!(!queue.show_completed(a));
        assert!(taken(&journal).is_empty());
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn hide_and_reset_keeps_paused_flag() {
        let (mut queue, _) = queue();
        queue.pause_queue();
        queue.enqueue(banner("A"));
        queue.hide_and_reset();

        assert!(!queue.is_running());
        assert_eq!(queue.state(), QueueState::Idle);
    }

    #[test]
    fn with_config_honors_autostart_and_animation() {
        let config = Config {
            autostart: Some(false),
            animate_transitions: Some(false),
            ..Config::default()
        };
        let mut queue = BannerQueue::with_config(RecordingSurface::new(), &config);
        assert!(!queue.is_running());

        queue.enqueue(banner("A"));
        queue.start_queue();
        assert_eq!(
            queue.surface().calls().first(),
            Some(&SurfaceCall::Show {
                id: queue.current().unwrap().id(),
                title: "A".to_string(),
                animated: false
            })
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Lifecycle notifications.
//!
//! Each display cycle emits, in order: `WillShow`, `DidShow`, zero or more
//! `Tapped`, `WillHide`, `DidHide`. Observers are called in subscription order;
//! a panicking observer is isolated and the remaining observers still run.

use crate::domain::message::Message;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::mpsc;

/// Kind of a [`BannerEvent`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WillShow,
    DidShow,
    Tapped,
    WillHide,
    DidHide,
}

impl EventKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EventKind::WillShow => "will-show",
            EventKind::DidShow => "did-show",
            EventKind::Tapped => "tapped",
            EventKind::WillHide => "will-hide",
            EventKind::DidHide => "did-hide",
        }
    }
}

/// A lifecycle notification carrying the banner it concerns.
#[derive(Debug, Clone)]
pub enum BannerEvent {
    WillShow(Message),
    DidShow(Message),
    Tapped(Message),
    WillHide(Message),
    DidHide(Message),
}

impl BannerEvent {
    fn new(kind: EventKind, message: Message) -> Self {
        match kind {
            EventKind::WillShow => BannerEvent::WillShow(message),
            EventKind::DidShow => BannerEvent::DidShow(message),
            EventKind::Tapped => BannerEvent::Tapped(message),
            EventKind::WillHide => BannerEvent::WillHide(message),
            EventKind::DidHide => BannerEvent::DidHide(message),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            BannerEvent::WillShow(_) => EventKind::WillShow,
            BannerEvent::DidShow(_) => EventKind::DidShow,
            BannerEvent::Tapped(_) => EventKind::Tapped,
            BannerEvent::WillHide(_) => EventKind::WillHide,
            BannerEvent::DidHide(_) => EventKind::DidHide,
        }
    }

    #[must_use]
    pub fn message(&self) -> &Message {
        match self {
            BannerEvent::WillShow(m)
            | BannerEvent::DidShow(m)
            | BannerEvent::Tapped(m)
            | BannerEvent::WillHide(m)
            | BannerEvent::DidHide(m) => m,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&BannerEvent) + Send>;

enum Observer {
    Callback(Callback),
    Channel(mpsc::UnboundedSender<BannerEvent>),
}

/// Fan-out of [`BannerEvent`]s to independent observers.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback observer.
    pub fn subscribe(&mut self, observer: impl FnMut(&BannerEvent) + Send + 'static) -> SubscriptionId {
        self.insert(Observer::Callback(Box::new(observer)))
    }

    /// Registers a channel observer. It is dropped once the receiver is closed.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<BannerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (self.insert(Observer::Channel(tx)), rx)
    }

    /// Removes an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers an event to every observer.
    ///
    /// Returns the number of callback observers that panicked.
    pub fn emit(&mut self, kind: EventKind, message: &Message) -> usize {
        if self.observers.is_empty() {
            return 0;
        }
        let event = BannerEvent::new(kind, message.clone());
        let mut failures = 0;
        self.observers.retain_mut(|(id, observer)| match observer {
            Observer::Callback(callback) => {
                if panic::catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                    log::warn!(
                        "banner observer {:?} panicked on {} for {}",
                        id,
                        kind.label(),
                        event.message().id()
                    );
                    failures += 1;
                }
                true
            }
            Observer::Channel(tx) => tx.send(event.clone()).is_ok(),
        });
        failures
    }

    fn insert(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Headless surface that records what the queue asked of it.

use crate::application::port::{Completion, DisplaySurface, SurfaceError};
use crate::domain::message::{Message, MessageId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Show {
        id: MessageId,
        title: String,
        animated: bool,
    },
    Hide {
        animated: bool,
    },
    Refresh {
        id: MessageId,
        title: String,
    },
}

/// Shared view of a [`RecordingSurface`]'s calls.
///
/// Stays readable after the surface has been moved into a queue or service.
#[derive(Debug, Clone, Default)]
pub struct SurfaceJournal {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl SurfaceJournal {
    /// Snapshot of every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.lock().clone()
    }

    /// Titles passed to `show`, in order.
    #[must_use]
    pub fn shown_titles(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Show { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn show_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Show { .. }))
            .count()
    }

    #[must_use]
    pub fn hide_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Hide { .. }))
            .count()
    }

    fn record(&self, call: SurfaceCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SurfaceCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A [`DisplaySurface`] that renders nothing and remembers everything.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    journal: SurfaceJournal,
    showing: Option<MessageId>,
    completion: Option<Completion>,
    fail_titles: Vec<String>,
    fail_hides: bool,
}

impl RecordingSurface {
    /// A surface whose transitions complete immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose transitions complete only when reported back.
    #[must_use]
    pub fn deferred() -> Self {
        Self {
            completion: Some(Completion::Deferred),
            ..Self::default()
        }
    }

    /// Makes `show` fail for banners with this title.
    #[must_use]
    pub fn failing_on(mut self, title: impl Into<String>) -> Self {
        self.fail_titles.push(title.into());
        self
    }

    /// Makes every `hide` fail.
    #[must_use]
    pub fn failing_hides(mut self) -> Self {
        self.fail_hides = true;
        self
    }

    #[must_use]
    pub fn journal(&self) -> SurfaceJournal {
        self.journal.clone()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.journal.calls()
    }

    #[must_use]
    pub fn show_count(&self) -> usize {
        self.journal.show_count()
    }

    #[must_use]
    pub fn hide_count(&self) -> usize {
        self.journal.hide_count()
    }

    /// The banner currently on the surface.
    #[must_use]
    pub fn showing(&self) -> Option<MessageId> {
        self.showing
    }

    fn completion(&self) -> Completion {
        self.completion.unwrap_or(Completion::Immediate)
    }
}

impl DisplaySurface for RecordingSurface {
    fn show(&mut self, message: &Message, animated: bool) -> Result<Completion, SurfaceError> {
        self.journal.record(SurfaceCall::Show {
            id: message.id(),
            title: message.title().to_string(),
            animated,
        });
        if self.fail_titles.iter().any(|title| title == message.title()) {
            return Err(SurfaceError::Rejected(message.title().to_string()));
        }
        self.showing = Some(message.id());
        Ok(self.completion())
    }

    fn hide(&mut self, animated: bool) -> Result<Completion, SurfaceError> {
        self.journal.record(SurfaceCall::Hide { animated });
        self.showing = None;
        if self.fail_hides {
            return Err(SurfaceError::Other("hide failed".to_string()));
        }
        Ok(self.completion())
    }

    fn is_showing(&self) -> bool {
        self.showing.is_some()
    }

    fn refresh(&mut self, message: &Message) -> Result<(), SurfaceError> {
        self.journal.record(SurfaceCall::Refresh {
            id: message.id(),
            title: message.title().to_string(),
        });
        Ok(())
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Thread-safe access to a running [`BannerService`](super::BannerService).

use super::Command;
use crate::domain::message::{Message, MessageId};
use crate::error::{Error, Result};
use crate::queue::{BannerEvent, QueueState, SubscriptionId};
use tokio::sync::{mpsc, oneshot};

/// Point-in-time copy of the queue's observable state.
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub state: QueueState,
    pub current: Option<Message>,
    pub pending: Vec<Message>,
    pub running: bool,
}

/// Sends commands to the service task.
///
/// Cheap to clone and usable from any thread. Every method fails with
/// [`Error::ServiceStopped`] once the service has shut down.
#[derive(Debug, Clone)]
pub struct BannerHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl BannerHandle {
    pub(super) fn new(commands: mpsc::UnboundedSender<Command>) -> Self {
        Self { commands }
    }

    /// Submits a banner in FIFO order (with reuse-identifier deduplication).
    pub fn enqueue(&self, message: Message) -> Result<()> {
        self.send(Command::Enqueue(message))
    }

    /// Shows a banner immediately, hiding the current one first.
    pub fn show(&self, message: Message, animated: bool) -> Result<()> {
        self.send(Command::Show { message, animated })
    }

    /// Hides the showing banner, if any.
    pub fn hide(&self, animated: bool) -> Result<()> {
        self.send(Command::Hide { animated })
    }

    /// Re-arms the auto-hide timer of the visible banner.
    pub fn start_hide_timer(&self) -> Result<()> {
        self.send(Command::StartHideTimer)
    }

    pub fn start_queue(&self) -> Result<()> {
        self.send(Command::StartQueue)
    }

    pub fn pause_queue(&self) -> Result<()> {
        self.send(Command::PauseQueue)
    }

    pub fn hide_and_reset(&self) -> Result<()> {
        self.send(Command::HideAndReset)
    }

    /// Reports a tap on the visible banner.
    pub fn tap(&self) -> Result<()> {
        self.send(Command::Tap)
    }

    /// Reports that a deferred show of banner `id` finished.
    pub fn notify_shown(&self, id: MessageId) -> Result<()> {
        self.send(Command::ShowCompleted(id))
    }

    /// Reports that a deferred hide of banner `id` finished.
    pub fn notify_hidden(&self, id: MessageId) -> Result<()> {
        self.send(Command::HideCompleted(id))
    }

    /// Subscribes to lifecycle events. Dropping the receiver unsubscribes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service is gone.
    pub async fn subscribe(
        &self,
    ) -> Result<(SubscriptionId, mpsc::UnboundedReceiver<BannerEvent>)> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Subscribe(reply))?;
        response.await.map_err(|_| Error::ServiceStopped)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.send(Command::Unsubscribe(id))
    }

    /// Returns the queue state after every previously sent command ran.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceStopped`] if the service is gone.
    pub async fn snapshot(&self) -> Result<QueueSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        response.await.map_err(|_| Error::ServiceStopped)
    }

    /// Stops the service after the commands already sent.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::ServiceStopped)
    }
}

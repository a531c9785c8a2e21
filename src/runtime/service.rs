// SPDX-License-Identifier: MPL-2.0
//! The task that owns a [`BannerQueue`].

use super::{BannerHandle, Command, QueueSnapshot};
use crate::application::port::DisplaySurface;
use crate::queue::{BannerQueue, TimerToken};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Owns a [`BannerQueue`] on a single tokio task.
pub struct BannerService<S> {
    queue: BannerQueue<S>,
    commands: mpsc::UnboundedReceiver<Command>,
    /// Timer tasks report back through this; it does not keep the service alive.
    loopback: mpsc::WeakUnboundedSender<Command>,
    /// The sleep currently standing in for the queue's armed timer.
    timer: Option<(TimerToken, JoinHandle<()>)>,
}

impl<S> BannerService<S>
where
    S: DisplaySurface + Send + 'static,
{
    /// Moves `queue` onto a new task.
    ///
    /// The task ends after [`BannerHandle::shutdown`] or once every handle is
    /// dropped, and yields the queue back. Must be called within a tokio runtime.
    pub fn spawn(queue: BannerQueue<S>) -> (BannerHandle, JoinHandle<BannerQueue<S>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Self {
            queue,
            commands: rx,
            loopback: tx.downgrade(),
            timer: None,
        };
        let task = tokio::spawn(service.run());
        (BannerHandle::new(tx), task)
    }

    async fn run(mut self) -> BannerQueue<S> {
        // A timer armed before spawning still needs its sleep.
        self.sync_timer();
        while let Some(command) = self.commands.recv().await {
            if !self.apply(command) {
                break;
            }
            self.sync_timer();
        }
        self.cancel_timer();
        log::debug!("banner service stopped");
        self.queue
    }

    /// Returns false when the service should stop.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Enqueue(message) => {
                self.queue.enqueue(message);
            }
            Command::Show { message, animated } => self.queue.show_animated(message, animated),
            Command::Hide { animated } => {
                self.queue.hide_animated(animated);
            }
            Command::StartHideTimer => {
                self.queue.start_hide_timer();
            }
            Command::StartQueue => self.queue.start_queue(),
            Command::PauseQueue => self.queue.pause_queue(),
            Command::HideAndReset => self.queue.hide_and_reset(),
            Command::Tap => {
                self.queue.tap();
            }
            Command::ShowCompleted(id) => {
                self.queue.show_completed(id);
            }
            Command::HideCompleted(id) => {
                self.queue.hide_completed(id);
            }
            Command::TimerFired(token) => {
                if self.timer.as_ref().is_some_and(|(armed, _)| *armed == token) {
                    self.timer = None;
                }
                self.queue.fire_timer(token);
            }
            Command::Subscribe(reply) => {
                let _ = reply.send(self.queue.subscribe_channel());
            }
            Command::Unsubscribe(id) => {
                self.queue.unsubscribe(id);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown => return false,
        }
        true
    }

    /// Keeps exactly one sleep running for the queue's armed timer.
    fn sync_timer(&mut self) {
        let armed = self
            .queue
            .armed_timer()
            .map(|timer| (timer.token(), timer.delay()));
        let scheduled = self.timer.as_ref().map(|(token, _)| *token);
        if armed.map(|(token, _)| token) == scheduled {
            return;
        }

        self.cancel_timer();
        if let Some((token, delay)) = armed {
            let loopback = self.loopback.clone();
            let sleeper = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(commands) = loopback.upgrade() {
                    let _ = commands.send(Command::TimerFired(token));
                }
            });
            self.timer = Some((token, sleeper));
        }
    }

    fn cancel_timer(&mut self) {
        if let Some((_, sleeper)) = self.timer.take() {
            sleeper.abort();
        }
    }

    fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            state: self.queue.state(),
            current: self.queue.current().cloned(),
            pending: self.queue.pending().cloned().collect(),
            running: self.queue.is_running(),
        }
    }
}

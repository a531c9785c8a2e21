// SPDX-License-Identifier: MPL-2.0
//! Running a [`BannerQueue`](crate::queue::BannerQueue) on a tokio task.
//!
//! The queue needs one execution context for every state change. The
//! [`BannerService`] is that context: it owns the queue on a single task,
//! receives [`BannerHandle`] commands from any thread in order, and turns the
//! queue's armed auto-hide timer into a `tokio::time::sleep`.
//!
//! # Example
//!
//! ```
//! use message_bar::domain::message::{Message, MessageType};
//! use message_bar::infrastructure::RecordingSurface;
//! use message_bar::queue::{BannerQueue, EventKind};
//! use message_bar::runtime::BannerService;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> message_bar::Result<()> {
//! let (handle, task) = BannerService::spawn(BannerQueue::new(RecordingSurface::new()));
//! let (_, mut events) = handle.subscribe().await?;
//!
//! handle.enqueue(Message::with_title("Saved", MessageType::Success)?)?;
//! assert_eq!(events.recv().await.map(|e| e.kind()), Some(EventKind::WillShow));
//!
//! handle.shutdown()?;
//! let queue = task.await.expect("service task panicked");
//! assert_eq!(queue.surface().show_count(), 1);
//! # Ok(())
//! # }
//! ```

mod handle;
mod service;

pub use handle::{BannerHandle, QueueSnapshot};
pub use service::BannerService;

use crate::domain::message::{Message, MessageId};
use crate::queue::{BannerEvent, SubscriptionId, TimerToken};
use tokio::sync::{mpsc, oneshot};

/// Work marshaled onto the service task.
#[derive(Debug)]
enum Command {
    Enqueue(Message),
    Show { message: Message, animated: bool },
    Hide { animated: bool },
    StartHideTimer,
    StartQueue,
    PauseQueue,
    HideAndReset,
    Tap,
    ShowCompleted(MessageId),
    HideCompleted(MessageId),
    TimerFired(TimerToken),
    Subscribe(oneshot::Sender<(SubscriptionId, mpsc::UnboundedReceiver<BannerEvent>)>),
    Unsubscribe(SubscriptionId),
    Snapshot(oneshot::Sender<QueueSnapshot>),
    Shutdown,
}

// SPDX-License-Identifier: MPL-2.0
//! One-at-a-time banner queue.
//!
//! # Components
//!
//! - [`manager`] - [`BannerQueue`], the display-slot state machine
//! - [`events`] - lifecycle notifications and the [`EventBus`]
//! - [`timer`] - cancellable auto-hide timers
//! - [`state`] - observable [`QueueState`] and [`Enqueued`] outcomes
//!
//! # Usage
//!
//! ```
//! use message_bar::domain::message::{Message, MessageType};
//! use message_bar::infrastructure::RecordingSurface;
//! use message_bar::queue::{BannerQueue, QueueState};
//!
//! let mut queue = BannerQueue::new(RecordingSurface::new());
//! queue.enqueue(Message::with_title("Saved", MessageType::Success).unwrap());
//! queue.enqueue(Message::with_title("Synced", MessageType::Success).unwrap());
//! assert_eq!(queue.state(), QueueState::Showing);
//! assert_eq!(queue.pending_len(), 1);
//!
//! queue.hide_animated(true);
//! assert_eq!(queue.current().map(Message::title), Some("Synced"));
//! ```

pub mod events;
pub mod manager;
pub mod state;
pub mod timer;

pub use events::{BannerEvent, EventBus, EventKind, SubscriptionId};
pub use manager::BannerQueue;
pub use state::{Enqueued, QueueState};
pub use timer::{AutoHideTimer, TimerSlot, TimerToken};

// SPDX-License-Identifier: MPL-2.0
//! `message_bar` queues short banner messages and shows them one at a time.
//!
//! Banners are shown in submission order on a single [`DisplaySurface`]
//! slot, auto-hide after their duration, and can be deduplicated by a reuse
//! identifier. Observers follow each banner's lifecycle through
//! [`BannerEvent`]s.
//!
//! The [`queue::BannerQueue`] state machine is synchronous and host-agnostic;
//! [`runtime::BannerService`] runs it on a tokio task and hands out cloneable
//! [`runtime::BannerHandle`]s.
//!
//! [`DisplaySurface`]: application::port::DisplaySurface
//! [`BannerEvent`]: queue::BannerEvent

#![doc(html_root_url = "https://docs.rs/message_bar/0.3.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod queue;
pub mod runtime;

pub use error::{Error, Result};

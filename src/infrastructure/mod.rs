// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the [`DisplaySurface`] port.
//!
//! # Available Adapters
//!
//! - [`console`]: renders banners as lines on a terminal or any writer
//! - [`recording`]: headless surface that records every call, with optional
//!   deferred completions and injected failures
//!
//! [`DisplaySurface`]: crate::application::port::DisplaySurface

pub mod console;
pub mod recording;

pub use console::ConsoleSurface;
pub use recording::{RecordingSurface, SurfaceCall, SurfaceJournal};

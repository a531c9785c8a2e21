// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`surface`]: something that can render a banner and animate it in and out
//!
//! # Design Notes
//!
//! - Traits use domain types only (no toolkit handles)
//! - Methods return `Result` with port-specific error types
//! - No `async fn`: long transitions report [`Completion::Deferred`] and signal
//!   back through the queue later
//!
//! # Example
//!
//! ```
//! use message_bar::application::port::{Completion, DisplaySurface, SurfaceError};
//! use message_bar::domain::message::Message;
//!
//! #[derive(Default)]
//! struct StatusLine {
//!     text: Option<String>,
//! }
//!
//! impl DisplaySurface for StatusLine {
//!     fn show(&mut self, message: &Message, _animated: bool) -> Result<Completion, SurfaceError> {
//!         self.text = Some(message.display_title());
//!         Ok(Completion::Immediate)
//!     }
//!
//!     fn hide(&mut self, _animated: bool) -> Result<Completion, SurfaceError> {
//!         self.text = None;
//!         Ok(Completion::Immediate)
//!     }
//!
//!     fn is_showing(&self) -> bool {
//!         self.text.is_some()
//!     }
//! }
//! ```

pub mod surface;

pub use surface::{Completion, DisplaySurface, SurfaceError};

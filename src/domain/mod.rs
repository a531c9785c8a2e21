// SPDX-License-Identifier: MPL-2.0
//! Domain layer - banner values with no dependencies beyond `std`.
//!
//! # Modules
//!
//! - [`message`]: the banner model ([`Message`](message::Message),
//!   [`MessageType`](message::MessageType), [`HideDelay`](message::HideDelay))
//! - [`diagnostics`]: diagnostics value objects
//!   ([`BufferCapacity`](diagnostics::BufferCapacity))

pub mod diagnostics;
pub mod message;

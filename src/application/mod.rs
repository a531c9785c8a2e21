// SPDX-License-Identifier: MPL-2.0
//! Application layer - collaborator contracts.
//!
//! - [`port`]: trait definitions the queue depends on and renderers implement
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The queue only ever sees the port traits, never a concrete renderer

pub mod port;

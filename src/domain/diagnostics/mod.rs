// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`BufferCapacity`]: how many queue diagnostic events are retained

mod newtypes;

pub use newtypes::{buffer_capacity_bounds, BufferCapacity};

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration.
//!
//! # Categories
//!
//! - **Queue**: start-up and animation behavior
//! - **Diagnostics**: retained event history
//! - **Demo**: values used by the `message-bar` binary

use crate::domain::diagnostics::buffer_capacity_bounds;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Whether a new queue processes submissions immediately.
pub const DEFAULT_AUTOSTART: bool = true;

/// Whether queue-driven transitions (advance, auto-hide) animate.
pub const DEFAULT_ANIMATE_TRANSITIONS: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

/// Minimum number of diagnostic events kept in memory.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MIN;

/// Maximum number of diagnostic events kept in memory.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MAX;

// ==========================================================================
// Demo Defaults
// ==========================================================================

/// Auto-hide delay for banners posted from the command line (in seconds).
pub const DEFAULT_DEMO_DURATION_SECS: f64 = 1.5;

/// Longest auto-hide delay the demo accepts (in seconds).
pub const MAX_DEMO_DURATION_SECS: f64 = 30.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);

    assert!(DEFAULT_DEMO_DURATION_SECS > 0.0);
    assert!(MAX_DEMO_DURATION_SECS >= DEFAULT_DEMO_DURATION_SECS);
};

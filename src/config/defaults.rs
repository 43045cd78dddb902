// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Throttling**: Fixed-interval report window bounds
//! - **Report Layout**: Header prefix
//! - **Sink**: Channel sink buffering

// ==========================================================================
// Throttling Defaults
// ==========================================================================

/// Default fixed-interval throttle window (in minutes).
///
/// Bounds are enforced by [`ReportInterval`](crate::domain::diagnostics::ReportInterval).
pub const DEFAULT_REPORT_INTERVAL_MINUTES: u64 =
    crate::domain::diagnostics::report_interval_bounds::DEFAULT;

// ==========================================================================
// Report Layout Defaults
// ==========================================================================

/// Default subsystem name printed at the start of every report header.
pub const DEFAULT_SUBSYSTEM: &str = "Sketch";

// ==========================================================================
// Sink Defaults
// ==========================================================================

/// Default number of reports a `ChannelSink` buffers before dropping.
pub const DEFAULT_SINK_CHANNEL_CAPACITY: usize = 100;

/// Minimum channel sink capacity.
pub const MIN_SINK_CHANNEL_CAPACITY: usize = 1;

/// Maximum channel sink capacity.
pub const MAX_SINK_CHANNEL_CAPACITY: usize = 10_000;

// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.
//!
//! This module provides type-safe wrappers for diagnostics values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Report Interval Bounds
// =============================================================================

/// Fixed-interval throttle bounds (1 minute to 1 day).
pub mod report_interval_bounds {
    /// Minimum window in minutes.
    pub const MIN: u64 = 1;
    /// Maximum window in minutes.
    pub const MAX: u64 = 24 * 60;
    /// Default window in minutes.
    pub const DEFAULT: u64 = 30;
}

// =============================================================================
// ReportInterval
// =============================================================================

/// Minimum spacing between two reports of the same fixed-interval category.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–1440 minutes).
///
/// # Example
///
/// ```
/// use sketch_monitor::domain::diagnostics::ReportInterval;
///
/// let interval = ReportInterval::from_minutes(30);
/// assert_eq!(interval.as_millis(), 30 * 60 * 1000);
///
/// // Values outside range are clamped
/// let too_low = ReportInterval::from_minutes(0);
/// assert_eq!(too_low.minutes(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportInterval(u64);

impl ReportInterval {
    /// Creates a new interval, clamping to valid range.
    #[must_use]
    pub fn from_minutes(minutes: u64) -> Self {
        Self(minutes.clamp(report_interval_bounds::MIN, report_interval_bounds::MAX))
    }

    /// Returns the window in minutes.
    #[must_use]
    pub fn minutes(self) -> u64 {
        self.0
    }

    /// Returns the window in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0 * 60 * 1000
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= report_interval_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= report_interval_bounds::MAX
    }
}

impl Default for ReportInterval {
    fn default() -> Self {
        Self(report_interval_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

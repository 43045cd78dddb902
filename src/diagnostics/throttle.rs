// SPDX-License-Identifier: MPL-2.0
//! Per-category report throttling.
//!
//! Two strategies keep the sink from being flooded:
//!
//! - **Fixed interval**: at most one report per [`IntervalKey`] per
//!   [`ReportInterval`] (30 minutes by default).
//! - **One shot**: at most one report for the process lifetime, used for
//!   GIF decoding failing because the native decoder is missing.
//!
//! Everything else is [`ThrottleRule::Always`] reported. The check and the
//! record happen as one atomic step, so concurrent callers racing on the
//! same category cannot both win a window.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::port::Clock;
use crate::domain::diagnostics::ReportInterval;

/// Slot value for a category that has never reported.
const NEVER_REPORTED: u64 = u64::MAX;

/// Categories throttled by the fixed-interval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKey {
    /// GIF decode failures other than a missing native capability.
    GifDecode,
    ImageDecode,
    CacheInstall,
    ImageProcess,
}

impl IntervalKey {
    pub const COUNT: usize = 4;

    pub const ALL: [IntervalKey; Self::COUNT] = [
        IntervalKey::GifDecode,
        IntervalKey::ImageDecode,
        IntervalKey::CacheInstall,
        IntervalKey::ImageProcess,
    ];

    fn index(self) -> usize {
        match self {
            IntervalKey::GifDecode => 0,
            IntervalKey::ImageDecode => 1,
            IntervalKey::CacheInstall => 2,
            IntervalKey::ImageProcess => 3,
        }
    }
}

/// Throttling rule selected for one event occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleRule {
    FixedInterval(IntervalKey),
    OneShot,
    Always,
    Never,
}

impl ThrottleRule {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThrottleRule::FixedInterval(_) => "fixed_interval",
            ThrottleRule::OneShot => "one_shot",
            ThrottleRule::Always => "always",
            ThrottleRule::Never => "never",
        }
    }
}

/// In-memory throttle bookkeeping, one instance per monitor.
///
/// Each fixed-interval slot only moves forward; the one-shot flag goes from
/// `false` to `true` once and never resets. Nothing is persisted.
#[derive(Debug)]
pub struct ThrottleState {
    last_reported_at: [AtomicU64; IntervalKey::COUNT],
    missing_native_support_reported: AtomicBool,
}

impl ThrottleState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_reported_at: std::array::from_fn(|_| AtomicU64::new(NEVER_REPORTED)),
            missing_native_support_reported: AtomicBool::new(false),
        }
    }

    /// Clock reading of the last report for `key`, if any.
    #[must_use]
    pub fn last_reported_at(&self, key: IntervalKey) -> Option<u64> {
        match self.last_reported_at[key.index()].load(Ordering::Acquire) {
            NEVER_REPORTED => None,
            millis => Some(millis),
        }
    }

    #[must_use]
    pub fn missing_native_support_reported(&self) -> bool {
        self.missing_native_support_reported.load(Ordering::Acquire)
    }

    /// Claims the window for `key` at `now` if `interval_millis` have passed.
    fn try_claim_interval(&self, key: IntervalKey, now: u64, interval_millis: u64) -> bool {
        let slot = &self.last_reported_at[key.index()];
        let mut last = slot.load(Ordering::Acquire);
        loop {
            // A reading older than the recorded one counts as zero elapsed,
            // keeping the slot non-decreasing.
            if last != NEVER_REPORTED && now.saturating_sub(last) < interval_millis {
                return false;
            }
            match slot.compare_exchange_weak(last, now, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return true,
                Err(actual) => last = actual,
            }
        }
    }

    fn try_claim_one_shot(&self) -> bool {
        self.missing_native_support_reported
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether an occurrence may be reported now.
///
/// [`ThrottlePolicy::should_report`] is side-effecting: a `true` answer has
/// already recorded the report, before the caller formats or emits anything.
pub struct ThrottlePolicy {
    state: ThrottleState,
    interval: ReportInterval,
    clock: Arc<dyn Clock>,
}

impl ThrottlePolicy {
    #[must_use]
    pub fn new(interval: ReportInterval, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: ThrottleState::new(),
            interval,
            clock,
        }
    }

    #[must_use]
    pub fn should_report(&self, rule: ThrottleRule) -> bool {
        match rule {
            ThrottleRule::FixedInterval(key) => {
                let now = self.clock.now_millis();
                self.state
                    .try_claim_interval(key, now, self.interval.as_millis())
            }
            ThrottleRule::OneShot => self.state.try_claim_one_shot(),
            ThrottleRule::Always => true,
            ThrottleRule::Never => false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ThrottleState {
        &self.state
    }

    #[must_use]
    pub fn interval(&self) -> ReportInterval {
        self.interval
    }
}

impl std::fmt::Debug for ThrottlePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottlePolicy")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

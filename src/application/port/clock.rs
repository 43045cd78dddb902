// SPDX-License-Identifier: MPL-2.0
//! Time source port definition.

use std::sync::Arc;

/// Port for a monotonic millisecond clock.
///
/// Throttling only compares readings from the same clock, so the origin is
/// arbitrary. Readings must never decrease.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

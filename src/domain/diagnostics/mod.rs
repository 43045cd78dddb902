// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! This module provides pure domain types for diagnostics:
//! - [`Cause`] / [`CauseKind`]: Failure values attached to pipeline events
//! - [`Rect`], [`TileInfo`], [`BitmapInfo`], [`DrawableInfo`]: Image descriptors
//! - [`MemoryStats`], [`StorageStats`], [`AbiList`], [`DeviceInfo`]: Environment facts
//! - [`ReportInterval`]: Fixed-interval throttle window

mod cause;
mod environment;
mod image;
mod newtypes;

pub use cause::{Cause, CauseKind};
pub use environment::{
    AbiList, DeviceInfo, MemoryStats, MountState, StorageCapacity, StorageStats, UNKNOWN,
};
pub use image::{BitmapInfo, ColorConfig, DrawableInfo, Rect, TileInfo};
pub use newtypes::{report_interval_bounds, ReportInterval};

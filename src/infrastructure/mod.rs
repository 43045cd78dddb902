// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap the host system (`sysinfo`),
//! time sources, and report delivery.
//!
//! # Available Adapters
//!
//! - [`SystemProbe`]: host memory, storage and device facts (implements [`EnvironmentProbe`])
//! - [`StaticProbe`]: preset environment facts (implements [`EnvironmentProbe`])
//! - [`ResourceTable`]: configured resource names (implements [`ResourceNames`])
//! - [`TracingSink`], [`ChannelSink`], [`RecordingSink`], [`BackgroundSink`]:
//!   report delivery (implement [`ReportSink`])
//! - [`SystemClock`], [`ManualClock`]: time sources (implement [`Clock`])
//!
//! [`EnvironmentProbe`]: crate::application::port::EnvironmentProbe
//! [`ResourceNames`]: crate::application::port::ResourceNames
//! [`ReportSink`]: crate::application::port::ReportSink
//! [`Clock`]: crate::application::port::Clock

mod clock;
mod dispatcher;
mod resources;
mod sinks;
mod static_probe;
mod system_probe;

pub use clock::{ManualClock, SystemClock};
pub use dispatcher::BackgroundSink;
pub use resources::ResourceTable;
pub use sinks::{channel_sink, ChannelSink, RecordingSink, TracingSink};
pub use static_probe::StaticProbe;
pub use system_probe::SystemProbe;

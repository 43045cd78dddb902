// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the reporting core remains
//! independent of concrete telemetry backends and OS queries.
//!
//! # Available Ports
//!
//! - [`environment`]: Device/runtime facts and resource-name lookup
//! - [`sink`]: Delivery of formatted reports
//! - [`clock`]: Monotonic time source for throttling
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `sysinfo` types, no channel types)
//! - Traits are `Send + Sync`; pipeline callbacks arrive from many threads
//! - No method returns `Result`: probing degrades to sentinels and delivery is
//!   fire-and-forget

pub mod clock;
pub mod environment;
pub mod sink;

// Re-export main types for convenience
pub use clock::Clock;
pub use environment::{EnvironmentProbe, NoResourceNames, ResourceNames};
pub use sink::ReportSink;

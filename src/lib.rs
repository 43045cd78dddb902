// SPDX-License-Identifier: MPL-2.0
//! `sketch_monitor` is a rate-limited diagnostic reporting layer for image
//! pipelines.
//!
//! It sits between a multi-stage image pipeline (download, disk-cache
//! install, decode, region decode, bitmap reuse, tile sorting) and a crash or
//! telemetry backend. Pipeline stages report failures to a
//! [`ReportingMonitor`]; the monitor throttles repeated noise, enriches what
//! passes with memory, storage and device facts, and hands one formatted
//! report to a [`ReportSink`].
//!
//! # Quick Start
//!
//! ```
//! use sketch_monitor::{MonitorBuilder, TracingSink};
//! use sketch_monitor::domain::diagnostics::{Cause, CauseKind};
//!
//! let monitor = MonitorBuilder::new().build(TracingSink);
//! monitor.on_cache_install_failed(
//!     Cause::new(CauseKind::UnableCreateDir, "permission denied"),
//!     "/data/cache/sketch",
//! );
//! ```
//!
//! # Layers
//!
//! - [`domain`]: pure value types
//! - [`application`]: port traits at the seams
//! - [`diagnostics`]: throttling, formatting and the monitor itself
//! - [`infrastructure`]: `sysinfo` probe, sinks and clocks
//! - [`config`]: TOML configuration
//!
//! The library never installs a `tracing` subscriber; hosts choose their own.

#![doc(html_root_url = "https://docs.rs/sketch_monitor/0.3.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::port::ReportSink;
pub use diagnostics::{MonitorBuilder, PipelineEvent, ReportingMonitor};
pub use error::{Error, Result};
pub use infrastructure::TracingSink;

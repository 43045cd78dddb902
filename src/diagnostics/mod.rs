// SPDX-License-Identifier: MPL-2.0
//! Rate-limited diagnostic reporting for image pipeline failures.
//!
//! The pipeline hands typed [`PipelineEvent`]s to a [`ReportingMonitor`],
//! which decides whether the occurrence is worth reporting now, enriches it
//! with environment facts and forwards one formatted report to a sink.
//!
//! # Architecture
//!
//! - [`ThrottlePolicy`]: per-category fixed-interval and one-shot throttling
//!   over lock-free [`ThrottleState`]
//! - [`EnvironmentSnapshot`]: the probe facts a given report prints
//! - [`DiagnosticFormatter`]: pure event + snapshot to message formatting
//! - [`ReportingMonitor`]: the entry point tying them to a
//!   [`ReportSink`](crate::application::port::ReportSink)
//!
//! # Throttling
//!
//! | Event | Rule |
//! |-------|------|
//! | GIF decode, missing native decoder | once per process |
//! | GIF decode (other), image decode, cache install, image process | once per interval |
//! | tile sort, bitmap reuse | every occurrence |
//! | download | never |

mod environment;
mod events;
mod formatter;
mod monitor;
mod report;
mod throttle;
mod uri;

pub use environment::{EnvironmentSnapshot, SnapshotNeeds};
pub use events::{DecodeFailure, EventCategory, PipelineEvent};
pub use formatter::{format_byte_size, DiagnosticFormatter};
pub use monitor::{MonitorBuilder, ReportingMonitor};
pub use report::{DiagnosticReport, ReportError};
pub use throttle::{IntervalKey, ThrottlePolicy, ThrottleRule, ThrottleState};
pub use uri::{UriResolver, UriScheme};

// SPDX-License-Identifier: MPL-2.0
//! Application layer - Port definitions.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The reporting core in [`crate::diagnostics`] only talks to ports
//!
//! # Example
//!
//! ```ignore
//! use sketch_monitor::application::port::{EnvironmentProbe, ReportSink};
//!
//! // Infrastructure implements the port trait
//! struct BugTrackerSink { /* ... */ }
//! impl ReportSink for BugTrackerSink { /* ... */ }
//! ```

pub mod port;

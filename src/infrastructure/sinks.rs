// SPDX-License-Identifier: MPL-2.0
//! Ready-made [`ReportSink`] implementations.
//!
//! - [`TracingSink`]: emits each report as a `tracing` error event
//! - [`ChannelSink`]: hands reports to a bounded channel without blocking
//! - [`RecordingSink`]: keeps reports in memory, for tests

use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::application::port::ReportSink;
use crate::diagnostics::DiagnosticReport;
use crate::domain::diagnostics::Cause;

// =============================================================================
// TracingSink
// =============================================================================

/// Sink writing reports to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, message: &str, cause: Option<&Cause>) {
        match cause {
            Some(cause) => tracing::error!(
                target: "sketch_monitor::report",
                cause = %cause,
                "{message}"
            ),
            None => tracing::error!(target: "sketch_monitor::report", "{message}"),
        }
    }
}

// =============================================================================
// ChannelSink
// =============================================================================

/// Creates a [`ChannelSink`] and the receiving end of its channel.
///
/// `capacity` is clamped to at least one slot.
#[must_use]
pub fn channel_sink(capacity: usize) -> (ChannelSink, Receiver<DiagnosticReport>) {
    let (report_tx, report_rx) = bounded(capacity.max(1));
    (ChannelSink { report_tx }, report_rx)
}

/// Sink forwarding reports over a bounded channel.
///
/// Never blocks the pipeline thread: when the channel is full or the
/// receiver is gone the report is dropped with a warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    report_tx: Sender<DiagnosticReport>,
}

impl ReportSink for ChannelSink {
    fn report(&self, message: &str, cause: Option<&Cause>) {
        let report = DiagnosticReport::new(message, cause.cloned());
        match self.report_tx.try_send(report) {
            Ok(()) => {}
            Err(TrySendError::Full(report)) => tracing::warn!(
                target: "sketch_monitor::sink",
                header = report.header(),
                "report channel full, dropping report"
            ),
            Err(TrySendError::Disconnected(report)) => tracing::warn!(
                target: "sketch_monitor::sink",
                header = report.header(),
                "report channel disconnected, dropping report"
            ),
        }
    }
}

// =============================================================================
// RecordingSink
// =============================================================================

/// Sink keeping every report in memory.
///
/// Clones share the same storage, so a test can keep one clone and hand the
/// other to the monitor.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<DiagnosticReport>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every report received so far, oldest first.
    #[must_use]
    pub fn reports(&self) -> Vec<DiagnosticReport> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DiagnosticReport>> {
        // A panic while holding the lock cannot leave the Vec inconsistent
        self.reports
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ReportSink for RecordingSink {
    fn report(&self, message: &str, cause: Option<&Cause>) {
        self.lock()
            .push(DiagnosticReport::new(message, cause.cloned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::CauseKind;

    #[test]
    fn recording_sink_clones_share_storage() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        handle.report("first", None);
        handle.report("second", Some(&Cause::without_message(CauseKind::OutOfMemory)));

        let reports = sink.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].message(), "first");
        assert!(reports[1].cause().is_some());

        sink.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn channel_sink_delivers_reports() {
        let (sink, receiver) = channel_sink(4);
        sink.report("Sketch - TileSortFailed", None);

        let report = receiver.try_recv().expect("report delivered");
        assert_eq!(report.header(), "Sketch - TileSortFailed");
    }

    #[test]
    fn channel_sink_drops_when_full() {
        let (sink, receiver) = channel_sink(1);
        sink.report("one", None);
        sink.report("two", None);

        assert_eq!(receiver.len(), 1);
        assert_eq!(receiver.try_recv().map(|r| r.message().to_string()).ok().as_deref(), Some("one"));
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (sink, receiver) = channel_sink(1);
        drop(receiver);
        sink.report("lost", None);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let (sink, receiver) = channel_sink(0);
        sink.report("kept", None);
        assert_eq!(receiver.len(), 1);
    }

    #[test]
    fn tracing_sink_accepts_reports() {
        TracingSink.report("Sketch - InBitmapException", None);
        TracingSink.report(
            "Sketch - DecodeNormalImageFailed",
            Some(&Cause::new(CauseKind::OutOfMemory, "heap")),
        );
    }
}

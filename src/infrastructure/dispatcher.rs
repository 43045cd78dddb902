// SPDX-License-Identifier: MPL-2.0
//! Background delivery of reports to a slow sink.
//!
//! [`BackgroundSink`] moves the inner sink onto its own thread so pipeline
//! workers only pay for a channel hand-off. The thread is stopped by
//! [`BackgroundSink::stop`] or by dropping the sink; reports already queued
//! are still delivered before it exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver, Sender};

use crate::application::port::ReportSink;
use crate::diagnostics::DiagnosticReport;
use crate::domain::diagnostics::Cause;

use super::sinks::{channel_sink, ChannelSink};

/// Commands that can be sent to the dispatcher thread.
#[derive(Debug, Clone, Copy)]
enum DispatcherCommand {
    Stop,
}

/// [`ReportSink`] delivering to an inner sink on a dedicated thread.
pub struct BackgroundSink {
    queue: ChannelSink,
    command_tx: Sender<DispatcherCommand>,
    thread_handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl BackgroundSink {
    /// Spawns the dispatcher thread with a queue of `capacity` reports.
    ///
    /// Reports arriving while the queue is full are dropped.
    #[must_use]
    pub fn start(inner: impl ReportSink + 'static, capacity: usize) -> Self {
        let (queue, report_rx) = channel_sink(capacity);
        let (command_tx, command_rx) = bounded::<DispatcherCommand>(1);
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);

        let thread_handle = thread::spawn(move || {
            Self::dispatch_loop(&inner, &report_rx, &command_rx);
            running_clone.store(false, Ordering::SeqCst);
        });

        Self {
            queue,
            command_tx,
            thread_handle: Some(thread_handle),
            running,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the dispatcher after draining queued reports and waits for it.
    pub fn stop(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            // Ignore errors if the thread already exited
            let _ = self.command_tx.send(DispatcherCommand::Stop);
            if handle.join().is_err() {
                tracing::warn!(target: "sketch_monitor::sink", "report dispatcher panicked");
            }
        }
    }

    fn dispatch_loop(
        inner: &dyn ReportSink,
        report_rx: &Receiver<DiagnosticReport>,
        command_rx: &Receiver<DispatcherCommand>,
    ) {
        loop {
            select! {
                recv(report_rx) -> report => match report {
                    Ok(report) => inner.report(report.message(), report.cause()),
                    Err(_) => return,
                },
                recv(command_rx) -> command => {
                    if matches!(command, Ok(DispatcherCommand::Stop) | Err(_)) {
                        break;
                    }
                },
            }
        }

        while let Ok(report) = report_rx.try_recv() {
            inner.report(report.message(), report.cause());
        }
    }
}

impl ReportSink for BackgroundSink {
    fn report(&self, message: &str, cause: Option<&Cause>) {
        self.queue.report(message, cause);
    }
}

impl Drop for BackgroundSink {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for BackgroundSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundSink")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

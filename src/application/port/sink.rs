// SPDX-License-Identifier: MPL-2.0
//! Report sink port definition.
//!
//! The sink is the telemetry or crash-reporting backend that finally receives
//! formatted reports. The monitor only guarantees it calls [`ReportSink::report`]
//! no more often than the throttling rules allow.

use std::sync::Arc;

use crate::domain::diagnostics::Cause;

/// Port for delivering a formatted diagnostic report.
///
/// # Contract
///
/// - Fire-and-forget: the call returns nothing and must not block the
///   calling pipeline thread for long. Asynchronous backends should queue
///   and return.
/// - Delivery failures are the sink's own concern. The monitor never
///   retries a report.
/// - `message` is self-contained; `cause` is the original pipeline failure,
///   absent for informational events.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; reports arrive from any pipeline
/// worker thread.
pub trait ReportSink: Send + Sync {
    fn report(&self, message: &str, cause: Option<&Cause>);
}

impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    fn report(&self, message: &str, cause: Option<&Cause>) {
        (**self).report(message, cause);
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn report(&self, message: &str, cause: Option<&Cause>) {
        (**self).report(message, cause);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingSink(AtomicUsize);

    impl ReportSink for CountingSink {
        fn report(&self, _message: &str, _cause: Option<&Cause>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn shared_sink_forwards_to_inner() {
        let inner = Arc::new(CountingSink::default());
        let shared: Arc<dyn ReportSink> = inner.clone();
        shared.report("one", None);
        shared.report("two", None);
        assert_eq!(inner.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn boxed_sink_forwards_to_inner() {
        let boxed: Box<dyn ReportSink> = Box::new(CountingSink::default());
        boxed.report("one", None);
    }
}

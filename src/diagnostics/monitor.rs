// SPDX-License-Identifier: MPL-2.0
//! The reporting monitor: throttle, enrich, format, hand off.
//!
//! [`ReportingMonitor`] is the entry point the image pipeline calls when a
//! stage fails. Each call is infallible and returns nothing; the only
//! observable effect is, at most, one call to the injected [`ReportSink`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::port::{Clock, EnvironmentProbe, ReportSink, ResourceNames};
use crate::config::{MonitorConfig, DEFAULT_SUBSYSTEM};
use crate::domain::diagnostics::{BitmapInfo, Cause, DrawableInfo, Rect, ReportInterval, TileInfo};
use crate::infrastructure::{ResourceTable, SystemClock, SystemProbe};

use super::environment::EnvironmentSnapshot;
use super::events::{DecodeFailure, PipelineEvent};
use super::formatter::DiagnosticFormatter;
use super::throttle::{ThrottlePolicy, ThrottleState};
use super::uri::UriResolver;

const LOG_TARGET: &str = "sketch_monitor";

// =============================================================================
// ReportingMonitor
// =============================================================================

/// Rate-limited diagnostic reporter for image pipeline failures.
///
/// Share one instance between pipeline workers with `Arc<ReportingMonitor>`.
///
/// # Example
///
/// ```
/// use sketch_monitor::diagnostics::MonitorBuilder;
/// use sketch_monitor::domain::diagnostics::{Cause, CauseKind};
/// use sketch_monitor::infrastructure::{ManualClock, RecordingSink, StaticProbe};
///
/// let sink = RecordingSink::new();
/// let monitor = MonitorBuilder::new()
///     .probe(StaticProbe::default())
///     .clock(ManualClock::new(0))
///     .build(sink.clone());
///
/// let cause = Cause::new(CauseKind::OutOfMemory, "heap exhausted");
/// monitor.on_image_process_failed(cause.clone(), "http://x/a.png", "blur");
/// monitor.on_image_process_failed(cause, "http://x/a.png", "blur");
///
/// assert_eq!(sink.len(), 1);
/// ```
pub struct ReportingMonitor {
    policy: ThrottlePolicy,
    formatter: DiagnosticFormatter,
    probe: Box<dyn EnvironmentProbe>,
    sink: Box<dyn ReportSink>,
}

impl ReportingMonitor {
    /// Handles one pipeline event.
    ///
    /// Throttling is decided before anything else, so suppressed events
    /// never query the environment or format a message.
    pub fn notify(&self, event: &PipelineEvent) {
        let category = event.category();
        let rule = event.throttle_rule();

        if !self.policy.should_report(rule) {
            tracing::debug!(
                target: LOG_TARGET,
                category = category.as_str(),
                rule = rule.as_str(),
                "report suppressed by throttle policy"
            );
            return;
        }

        let snapshot = EnvironmentSnapshot::capture(self.probe.as_ref(), event.snapshot_needs());
        let report = self.formatter.format(event, &snapshot);
        tracing::info!(
            target: LOG_TARGET,
            category = category.as_str(),
            rule = rule.as_str(),
            header = report.header(),
            "reporting pipeline failure"
        );
        self.sink.report(report.message(), report.cause());
    }

    pub fn on_gif_decode_failed(&self, failure: DecodeFailure) {
        self.notify(&PipelineEvent::GifDecodeFailed(failure));
    }

    pub fn on_image_decode_failed(&self, failure: DecodeFailure) {
        self.notify(&PipelineEvent::ImageDecodeFailed(failure));
    }

    pub fn on_cache_install_failed(&self, cause: Cause, cache_dir: impl Into<PathBuf>) {
        self.notify(&PipelineEvent::CacheInstallFailed {
            cause,
            cache_dir: cache_dir.into(),
        });
    }

    pub fn on_image_process_failed(
        &self,
        cause: Cause,
        image_uri: impl Into<String>,
        processor_key: impl Into<String>,
    ) {
        self.notify(&PipelineEvent::ImageProcessFailed {
            cause,
            image_uri: image_uri.into(),
            processor_key: processor_key.into(),
        });
    }

    pub fn on_tile_sort_failed(&self, cause: Cause, tiles: Vec<TileInfo>, used_fallback_sort: bool) {
        self.notify(&PipelineEvent::TileSortFailed {
            cause,
            tiles,
            used_fallback_sort,
        });
    }

    pub fn on_bitmap_reused_while_displayed(
        &self,
        request_uri: impl Into<String>,
        drawable: DrawableInfo,
    ) {
        self.notify(&PipelineEvent::BitmapReusedWhileDisplayed {
            request_uri: request_uri.into(),
            drawable,
        });
    }

    /// `src_rect` is `Some` for region decodes.
    pub fn on_bitmap_reuse_rejected(
        &self,
        image_uri: impl Into<String>,
        (image_width, image_height): (u32, u32),
        src_rect: Option<Rect>,
        sample_size: u32,
        reused_bitmap: BitmapInfo,
    ) {
        self.notify(&PipelineEvent::BitmapReuseRejected {
            image_uri: image_uri.into(),
            image_width,
            image_height,
            src_rect,
            sample_size,
            reused_bitmap,
        });
    }

    /// Accepted so every pipeline hook has a counterpart; never reported.
    pub fn on_download_failed(&self, cause: Cause, request_uri: impl Into<String>) {
        self.notify(&PipelineEvent::DownloadFailed {
            cause,
            request_uri: request_uri.into(),
        });
    }

    #[must_use]
    pub fn throttle_state(&self) -> &ThrottleState {
        self.policy.state()
    }

    #[must_use]
    pub fn report_interval(&self) -> ReportInterval {
        self.policy.interval()
    }

    #[must_use]
    pub fn formatter(&self) -> &DiagnosticFormatter {
        &self.formatter
    }
}

impl std::fmt::Debug for ReportingMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportingMonitor")
            .field("policy", &self.policy)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// MonitorBuilder
// =============================================================================

/// Assembles a [`ReportingMonitor`] from its collaborators.
///
/// Unset collaborators default to the host implementations: [`SystemProbe`]
/// without a storage directory, [`SystemClock`], and no resource names.
#[derive(Default)]
pub struct MonitorBuilder {
    subsystem: Option<String>,
    interval: ReportInterval,
    clock: Option<Arc<dyn Clock>>,
    probe: Option<Box<dyn EnvironmentProbe>>,
    names: Option<Arc<dyn ResourceNames>>,
}

impl MonitorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded from configuration: subsystem, interval, resource
    /// names and a [`SystemProbe`] watching the configured storage directory.
    #[must_use]
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new()
            .subsystem(config.subsystem())
            .report_interval(config.report_interval())
            .probe(SystemProbe::new(config.storage_dir()))
            .resource_names(ResourceTable::from_config(config))
    }

    #[must_use]
    pub fn subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = Some(subsystem.into());
        self
    }

    #[must_use]
    pub fn report_interval(mut self, interval: ReportInterval) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    #[must_use]
    pub fn probe(mut self, probe: impl EnvironmentProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    #[must_use]
    pub fn resource_names(mut self, names: impl ResourceNames + 'static) -> Self {
        self.names = Some(Arc::new(names));
        self
    }

    #[must_use]
    pub fn build(self, sink: impl ReportSink + 'static) -> ReportingMonitor {
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock::new()));
        let uris = self.names.map(UriResolver::new).unwrap_or_default();
        let subsystem = self
            .subsystem
            .unwrap_or_else(|| DEFAULT_SUBSYSTEM.to_string());
        let probe = self
            .probe
            .unwrap_or_else(|| Box::new(SystemProbe::new(None)));

        tracing::debug!(
            target: LOG_TARGET,
            subsystem = %subsystem,
            interval_minutes = self.interval.minutes(),
            "reporting monitor created"
        );

        ReportingMonitor {
            policy: ThrottlePolicy::new(self.interval, clock),
            formatter: DiagnosticFormatter::new(subsystem, uris),
            probe,
            sink: Box::new(sink),
        }
    }
}

impl std::fmt::Debug for MonitorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorBuilder")
            .field("subsystem", &self.subsystem)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::domain::diagnostics::{
        AbiList, CauseKind, ColorConfig, DeviceInfo, MemoryStats, StorageStats,
    };
    use crate::infrastructure::{ManualClock, RecordingSink, StaticProbe};

    const MINUTE: Duration = Duration::from_secs(60);

    fn monitor() -> (ReportingMonitor, RecordingSink, Arc<ManualClock>) {
        let sink = RecordingSink::new();
        let clock = Arc::new(ManualClock::new(0));
        let monitor = MonitorBuilder::new()
            .probe(StaticProbe::default())
            .clock(Arc::clone(&clock))
            .build(sink.clone());
        (monitor, sink, clock)
    }

    fn decode(kind: CauseKind) -> DecodeFailure {
        DecodeFailure::new(Cause::new(kind, "x"), "http://x/a.gif", 1, 1, "image/gif")
    }

    /// Probe counting how often it is queried.
    #[derive(Default)]
    struct CountingProbe(Arc<AtomicUsize>);

    impl EnvironmentProbe for CountingProbe {
        fn memory_stats(&self) -> MemoryStats {
            self.0.fetch_add(1, Ordering::SeqCst);
            MemoryStats::unknown()
        }

        fn storage_stats(&self) -> StorageStats {
            self.0.fetch_add(1, Ordering::SeqCst);
            StorageStats::mounted(1, 2)
        }

        fn device_abis(&self) -> AbiList {
            self.0.fetch_add(1, Ordering::SeqCst);
            AbiList::Supported(Vec::new())
        }

        fn device_info(&self) -> DeviceInfo {
            self.0.fetch_add(1, Ordering::SeqCst);
            DeviceInfo::default()
        }
    }

    #[test]
    fn monitor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportingMonitor>();
    }

    #[test]
    fn fixed_interval_category_reports_once_per_window() {
        let (monitor, sink, clock) = monitor();

        monitor.on_image_decode_failed(decode(CauseKind::OutOfMemory));
        clock.advance(29 * MINUTE);
        monitor.on_image_decode_failed(decode(CauseKind::OutOfMemory));
        assert_eq!(sink.len(), 1);

        clock.advance(2 * MINUTE);
        monitor.on_image_decode_failed(decode(CauseKind::OutOfMemory));
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn suppressed_events_do_not_query_the_probe() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = RecordingSink::new();
        let monitor = MonitorBuilder::new()
            .probe(CountingProbe(Arc::clone(&calls)))
            .clock(ManualClock::new(0))
            .build(sink.clone());
        let cause = || Cause::without_message(CauseKind::UnableCreateDir);

        monitor.on_cache_install_failed(cause(), "/cache");
        let after_first = calls.load(Ordering::SeqCst);
        monitor.on_cache_install_failed(cause(), "/cache");

        assert_eq!(after_first, 1);
        assert_eq!(calls.load(Ordering::SeqCst), after_first);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn one_shot_and_fixed_interval_gif_branches_are_independent() {
        let (monitor, sink, _clock) = monitor();

        monitor.on_gif_decode_failed(decode(CauseKind::LinkResolution));
        monitor.on_gif_decode_failed(decode(CauseKind::StaticInit));
        monitor.on_gif_decode_failed(decode(CauseKind::OutOfMemory));

        assert_eq!(sink.len(), 2);
        assert!(monitor.throttle_state().missing_native_support_reported());
    }

    #[test]
    fn download_failures_are_never_reported() {
        let (monitor, sink, _clock) = monitor();
        for _ in 0..3 {
            monitor.on_download_failed(Cause::other("IoError", "reset"), "http://x/a.png");
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn sink_receives_cause_with_message() {
        let (monitor, sink, _clock) = monitor();
        monitor.on_image_process_failed(
            Cause::new(CauseKind::OutOfMemory, "heap exhausted"),
            "http://x/a.png",
            "blur",
        );

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].message().contains("memoryState: Pixel 7, 34"));
        assert_eq!(
            reports[0].cause().map(Cause::kind),
            Some(&CauseKind::OutOfMemory)
        );
    }

    #[test]
    fn bitmap_events_always_report_without_cause() {
        let (monitor, sink, _clock) = monitor();
        let drawable = DrawableInfo::new("k", BitmapInfo::new(1, 1, ColorConfig::Alpha8));
        for _ in 0..5 {
            monitor.on_bitmap_reused_while_displayed("http://x/a.png", drawable.clone());
        }
        assert_eq!(sink.len(), 5);
        assert!(sink.reports().iter().all(|report| report.cause().is_none()));
    }

    #[test]
    fn builder_applies_subsystem_and_interval() {
        let sink = RecordingSink::new();
        let clock = Arc::new(ManualClock::new(0));
        let monitor = MonitorBuilder::new()
            .subsystem("Gallery")
            .report_interval(ReportInterval::from_minutes(5))
            .probe(StaticProbe::default())
            .clock(Arc::clone(&clock))
            .build(sink.clone());

        let cause = || Cause::without_message(CauseKind::UnableCreateFile);
        monitor.on_cache_install_failed(cause(), "/cache");
        clock.advance(5 * MINUTE);
        monitor.on_cache_install_failed(cause(), "/cache");

        assert_eq!(sink.len(), 2);
        assert!(sink.reports()[0].header().starts_with("Gallery - InstallDiskCacheFailed"));
        assert_eq!(monitor.report_interval().minutes(), 5);
    }

    #[test]
    fn from_config_uses_configured_values() {
        let config = MonitorConfig {
            subsystem: Some("Viewer".into()),
            report_interval_minutes: Some(10),
            resources: [("42".to_string(), "app:drawable/logo".to_string())].into(),
            ..MonitorConfig::default()
        };

        let sink = RecordingSink::new();
        let monitor = MonitorBuilder::from_config(&config)
            .probe(StaticProbe::default())
            .clock(ManualClock::new(0))
            .build(sink.clone());

        monitor.on_image_decode_failed(DecodeFailure::new(
            Cause::other("DecodeError", "bad header"),
            "drawable://42",
            0,
            0,
            "image/png",
        ));

        assert_eq!(monitor.formatter().subsystem(), "Viewer");
        assert_eq!(monitor.report_interval().minutes(), 10);
        assert_eq!(
            sink.reports()[0].header(),
            "Viewer - DecodeNormalImageFailed - DecodeError - app:drawable/logo"
        );
    }
}

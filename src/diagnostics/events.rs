// SPDX-License-Identifier: MPL-2.0
//! Pipeline event types.
//!
//! This module defines the failures and anomalies the image pipeline reports
//! to the monitor, one variant per pipeline hook, and classifies each one
//! into a throttling rule and the environment facts its report needs.

use std::path::PathBuf;

use crate::domain::diagnostics::{BitmapInfo, Cause, DrawableInfo, Rect, TileInfo};

use super::environment::SnapshotNeeds;
use super::throttle::{IntervalKey, ThrottleRule};

/// Payload shared by the two decode-failure events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    pub cause: Cause,
    pub request_uri: String,
    /// Width reported by the bounds-only decode pass.
    pub out_width: u32,
    /// Height reported by the bounds-only decode pass.
    pub out_height: u32,
    pub out_mime_type: String,
}

impl DecodeFailure {
    #[must_use]
    pub fn new(
        cause: Cause,
        request_uri: impl Into<String>,
        out_width: u32,
        out_height: u32,
        out_mime_type: impl Into<String>,
    ) -> Self {
        Self {
            cause,
            request_uri: request_uri.into(),
            out_width,
            out_height,
            out_mime_type: out_mime_type.into(),
        }
    }
}

/// A failure or anomaly notification from the image pipeline.
///
/// # Variants
///
/// - `GifDecodeFailed` / `ImageDecodeFailed`: decoding stage failures
/// - `CacheInstallFailed`: the disk cache could not be set up
/// - `ImageProcessFailed`: a post-decode processor (blur, crop...) failed
/// - `TileSortFailed`: sorting/merging large-image tiles hit an inconsistent comparator
/// - `BitmapReusedWhileDisplayed`: a recycled bitmap was still on screen
/// - `BitmapReuseRejected`: the decoder refused a reusable bitmap
/// - `DownloadFailed`: accepted for completeness, never reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    GifDecodeFailed(DecodeFailure),

    ImageDecodeFailed(DecodeFailure),

    CacheInstallFailed {
        cause: Cause,
        cache_dir: PathBuf,
    },

    ImageProcessFailed {
        cause: Cause,
        image_uri: String,
        processor_key: String,
    },

    TileSortFailed {
        cause: Cause,
        tiles: Vec<TileInfo>,
        /// Whether the pipeline had switched to the legacy merge sort.
        used_fallback_sort: bool,
    },

    BitmapReusedWhileDisplayed {
        request_uri: String,
        drawable: DrawableInfo,
    },

    BitmapReuseRejected {
        image_uri: String,
        image_width: u32,
        image_height: u32,
        /// Region being decoded; `None` for full-image decodes.
        src_rect: Option<Rect>,
        sample_size: u32,
        reused_bitmap: BitmapInfo,
    },

    DownloadFailed {
        cause: Cause,
        request_uri: String,
    },
}

/// Event category, one per [`PipelineEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    GifDecode,
    ImageDecode,
    CacheInstall,
    ImageProcess,
    TileSort,
    BitmapReusedWhileDisplayed,
    BitmapReuseRejected,
    Download,
}

impl EventCategory {
    /// Stable snake-case name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::GifDecode => "gif_decode",
            EventCategory::ImageDecode => "image_decode",
            EventCategory::CacheInstall => "cache_install",
            EventCategory::ImageProcess => "image_process",
            EventCategory::TileSort => "tile_sort",
            EventCategory::BitmapReusedWhileDisplayed => "bitmap_reused_while_displayed",
            EventCategory::BitmapReuseRejected => "bitmap_reuse_rejected",
            EventCategory::Download => "download",
        }
    }
}

impl PipelineEvent {
    #[must_use]
    pub fn category(&self) -> EventCategory {
        match self {
            PipelineEvent::GifDecodeFailed(_) => EventCategory::GifDecode,
            PipelineEvent::ImageDecodeFailed(_) => EventCategory::ImageDecode,
            PipelineEvent::CacheInstallFailed { .. } => EventCategory::CacheInstall,
            PipelineEvent::ImageProcessFailed { .. } => EventCategory::ImageProcess,
            PipelineEvent::TileSortFailed { .. } => EventCategory::TileSort,
            PipelineEvent::BitmapReusedWhileDisplayed { .. } => {
                EventCategory::BitmapReusedWhileDisplayed
            }
            PipelineEvent::BitmapReuseRejected { .. } => EventCategory::BitmapReuseRejected,
            PipelineEvent::DownloadFailed { .. } => EventCategory::Download,
        }
    }

    /// Label printed in the report header.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PipelineEvent::GifDecodeFailed(_) => "DecodeGifImageFailed",
            PipelineEvent::ImageDecodeFailed(_) => "DecodeNormalImageFailed",
            PipelineEvent::CacheInstallFailed { .. } => "InstallDiskCacheFailed",
            PipelineEvent::ImageProcessFailed { .. } => "ProcessImageFailed",
            PipelineEvent::TileSortFailed { .. } => "TileSortFailed",
            PipelineEvent::BitmapReusedWhileDisplayed { .. } => "BitmapRecycledOnDisplay",
            PipelineEvent::BitmapReuseRejected {
                src_rect: Some(_), ..
            } => "InBitmapExceptionForRegionDecoder",
            PipelineEvent::BitmapReuseRejected { src_rect: None, .. } => "InBitmapException",
            PipelineEvent::DownloadFailed { .. } => "DownloadFailed",
        }
    }

    /// The underlying failure, absent for informational bitmap events.
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            PipelineEvent::GifDecodeFailed(failure) | PipelineEvent::ImageDecodeFailed(failure) => {
                Some(&failure.cause)
            }
            PipelineEvent::CacheInstallFailed { cause, .. }
            | PipelineEvent::ImageProcessFailed { cause, .. }
            | PipelineEvent::TileSortFailed { cause, .. }
            | PipelineEvent::DownloadFailed { cause, .. } => Some(cause),
            PipelineEvent::BitmapReusedWhileDisplayed { .. }
            | PipelineEvent::BitmapReuseRejected { .. } => None,
        }
    }

    /// True when this is a GIF decode failure caused by a missing native
    /// capability (unresolvable library or failed static initialization).
    #[must_use]
    pub fn is_missing_native_capability(&self) -> bool {
        matches!(
            self,
            PipelineEvent::GifDecodeFailed(failure)
                if failure.cause.kind().is_missing_native_capability()
        )
    }

    #[must_use]
    pub fn is_out_of_memory(&self) -> bool {
        self.cause().is_some_and(|cause| cause.kind().is_out_of_memory())
    }

    /// Throttling rule governing this occurrence.
    #[must_use]
    pub fn throttle_rule(&self) -> ThrottleRule {
        match self {
            PipelineEvent::GifDecodeFailed(_) if self.is_missing_native_capability() => {
                ThrottleRule::OneShot
            }
            PipelineEvent::GifDecodeFailed(_) => ThrottleRule::FixedInterval(IntervalKey::GifDecode),
            PipelineEvent::ImageDecodeFailed(_) => {
                ThrottleRule::FixedInterval(IntervalKey::ImageDecode)
            }
            PipelineEvent::CacheInstallFailed { .. } => {
                ThrottleRule::FixedInterval(IntervalKey::CacheInstall)
            }
            PipelineEvent::ImageProcessFailed { .. } => {
                ThrottleRule::FixedInterval(IntervalKey::ImageProcess)
            }
            PipelineEvent::TileSortFailed { .. }
            | PipelineEvent::BitmapReusedWhileDisplayed { .. }
            | PipelineEvent::BitmapReuseRejected { .. } => ThrottleRule::Always,
            PipelineEvent::DownloadFailed { .. } => ThrottleRule::Never,
        }
    }

    /// Environment facts the report for this occurrence prints.
    #[must_use]
    pub fn snapshot_needs(&self) -> SnapshotNeeds {
        let out_of_memory = self.is_out_of_memory();
        let base = SnapshotNeeds::none().with_memory(out_of_memory);
        match self {
            PipelineEvent::GifDecodeFailed(_) => {
                base.with_abis(self.is_missing_native_capability())
            }
            PipelineEvent::CacheInstallFailed { .. } => base.with_storage(true),
            PipelineEvent::ImageProcessFailed { .. } => base.with_device(out_of_memory),
            PipelineEvent::BitmapReusedWhileDisplayed { .. }
            | PipelineEvent::BitmapReuseRejected { .. } => {
                base.with_memory(true).with_device(true)
            }
            PipelineEvent::ImageDecodeFailed(_)
            | PipelineEvent::TileSortFailed { .. }
            | PipelineEvent::DownloadFailed { .. } => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::{CauseKind, ColorConfig};

    fn gif(kind: CauseKind) -> PipelineEvent {
        PipelineEvent::GifDecodeFailed(DecodeFailure::new(
            Cause::new(kind, "boom"),
            "http://x/a.gif",
            10,
            10,
            "image/gif",
        ))
    }

    fn reuse(src_rect: Option<Rect>) -> PipelineEvent {
        PipelineEvent::BitmapReuseRejected {
            image_uri: "content://res/123".into(),
            image_width: 100,
            image_height: 200,
            src_rect,
            sample_size: 2,
            reused_bitmap: BitmapInfo::new(50, 100, ColorConfig::Argb8888),
        }
    }

    #[test]
    fn gif_missing_library_is_one_shot() {
        assert_eq!(gif(CauseKind::LinkResolution).throttle_rule(), ThrottleRule::OneShot);
        assert_eq!(gif(CauseKind::StaticInit).throttle_rule(), ThrottleRule::OneShot);
    }

    #[test]
    fn gif_other_causes_use_their_own_interval() {
        assert_eq!(
            gif(CauseKind::OutOfMemory).throttle_rule(),
            ThrottleRule::FixedInterval(IntervalKey::GifDecode)
        );
    }

    #[test]
    fn correctness_bugs_always_report() {
        let tile_sort = PipelineEvent::TileSortFailed {
            cause: Cause::without_message(CauseKind::IllegalArgument),
            tiles: Vec::new(),
            used_fallback_sort: false,
        };
        assert_eq!(tile_sort.throttle_rule(), ThrottleRule::Always);
        assert_eq!(reuse(None).throttle_rule(), ThrottleRule::Always);
        assert_eq!(reuse(Some(Rect::new(0, 0, 1, 1))).throttle_rule(), ThrottleRule::Always);
    }

    #[test]
    fn downloads_never_report() {
        let event = PipelineEvent::DownloadFailed {
            cause: Cause::other("IoError", "reset"),
            request_uri: "http://x/a.png".into(),
        };
        assert_eq!(event.throttle_rule(), ThrottleRule::Never);
        assert_eq!(event.category(), EventCategory::Download);
    }

    #[test]
    fn bitmap_reuse_label_depends_on_region() {
        assert_eq!(reuse(None).label(), "InBitmapException");
        assert_eq!(
            reuse(Some(Rect::new(0, 0, 10, 10))).label(),
            "InBitmapExceptionForRegionDecoder"
        );
    }

    #[test]
    fn bitmap_events_have_no_cause() {
        assert!(reuse(None).cause().is_none());
        assert!(!reuse(None).is_out_of_memory());
    }

    #[test]
    fn snapshot_needs_follow_the_event() {
        assert_eq!(gif(CauseKind::Other("X".into())).snapshot_needs(), SnapshotNeeds::none());
        assert!(gif(CauseKind::LinkResolution).snapshot_needs().abis);
        assert!(gif(CauseKind::OutOfMemory).snapshot_needs().memory);

        let cache = PipelineEvent::CacheInstallFailed {
            cause: Cause::without_message(CauseKind::UnableCreateDir),
            cache_dir: PathBuf::from("/cache"),
        };
        let needs = cache.snapshot_needs();
        assert!(needs.storage && !needs.memory && !needs.device);

        let needs = reuse(None).snapshot_needs();
        assert!(needs.memory && needs.device && !needs.storage);
    }

    #[test]
    fn process_failure_needs_device_only_when_out_of_memory() {
        let event = |kind| PipelineEvent::ImageProcessFailed {
            cause: Cause::new(kind, "x"),
            image_uri: "http://x/a.png".into(),
            processor_key: "blur".into(),
        };
        assert!(event(CauseKind::OutOfMemory).snapshot_needs().device);
        assert!(!event(CauseKind::IllegalArgument).snapshot_needs().device);
    }

    #[test]
    fn category_names_are_snake_case() {
        assert_eq!(EventCategory::GifDecode.as_str(), "gif_decode");
        assert_eq!(
            EventCategory::BitmapReusedWhileDisplayed.as_str(),
            "bitmap_reused_while_displayed"
        );
    }
}

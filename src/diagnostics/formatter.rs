// SPDX-License-Identifier: MPL-2.0
//! Diagnostic message formatting.
//!
//! [`DiagnosticFormatter::format`] is a pure function of the event and the
//! environment snapshot: the same inputs always produce the same bytes.
//!
//! # Message Layout
//!
//! ```text
//! <subsystem> - <label> - <cause kind or processor key> - <uri or resource name>
//! exceptionMessage: <cause message>
//! <label>: <value>
//! ...
//! ```
//!
//! Header segments that do not apply to an event are left out rather than
//! printed empty. Environment facts that could not be read print `unknown`.

use std::fmt::{self, Display, Write as _};

use crate::config::DEFAULT_SUBSYSTEM;
use crate::domain::diagnostics::{MemoryStats, MountState, TileInfo, UNKNOWN};

use super::environment::EnvironmentSnapshot;
use super::events::{DecodeFailure, PipelineEvent};
use super::report::DiagnosticReport;
use super::uri::UriResolver;

// =============================================================================
// Byte Formatting
// =============================================================================

/// Formats a byte count for humans (`512 B`, `1.5 KB`, `2.00 MB`, `1.00 GB`).
#[must_use]
pub fn format_byte_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn format_optional_bytes(bytes: Option<u64>) -> String {
    bytes.map_or_else(|| UNKNOWN.to_string(), format_byte_size)
}

// =============================================================================
// Section Builder
// =============================================================================

/// Ordered header segments and labeled lines, joined on [`MessageBuilder::build`].
struct MessageBuilder {
    header: Vec<String>,
    sections: Vec<(&'static str, String)>,
}

impl MessageBuilder {
    fn new(subsystem: &str, label: &str) -> Self {
        Self {
            header: vec![subsystem.to_string(), label.to_string()],
            sections: Vec::new(),
        }
    }

    fn segment(mut self, value: impl Display) -> Self {
        self.header.push(value.to_string());
        self
    }

    fn section(mut self, label: &'static str, value: impl Display) -> Self {
        self.sections.push((label, value.to_string()));
        self
    }

    fn optional<T: Display>(self, label: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.section(label, value),
            None => self,
        }
    }

    fn section_if<T: Display>(
        self,
        condition: bool,
        label: &'static str,
        value: impl FnOnce() -> T,
    ) -> Self {
        if condition {
            self.section(label, value())
        } else {
            self
        }
    }

    fn build(self) -> String {
        let mut message = self.header.join(" - ");
        for (label, value) in self.sections {
            // Writing to a String cannot fail.
            let _ = write!(message, "\n{label}: {value}");
        }
        message
    }
}

// =============================================================================
// Section Values
// =============================================================================

struct MemoryInfo<'a>(&'a MemoryStats);

impl Display for MemoryInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maxMemory={}, freeMemory={}, totalMemory={}",
            format_optional_bytes(self.0.max_bytes),
            format_optional_bytes(self.0.free_bytes),
            format_optional_bytes(self.0.total_bytes)
        )
    }
}

/// `model, os, free/max`.
struct SystemState<'a>(&'a EnvironmentSnapshot);

impl Display for SystemState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let memory = self.0.memory().copied().unwrap_or_default();
        match self.0.device() {
            Some(device) => write!(f, "{device}")?,
            None => write!(f, "{UNKNOWN}, {UNKNOWN}")?,
        }
        write!(
            f,
            ", {}/{}",
            format_optional_bytes(memory.free_bytes),
            format_optional_bytes(memory.max_bytes)
        )
    }
}

struct ImageInfo<'a>(&'a DecodeFailure);

impl Display for ImageInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "outWidth={}, outHeight={}, outMimeType={}",
            self.0.out_width, self.0.out_height, self.0.out_mime_type
        )
    }
}

struct TileList<'a>(&'a [TileInfo]);

impl Display for TileList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, tile) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tile}")?;
        }
        f.write_str("]")
    }
}

// =============================================================================
// DiagnosticFormatter
// =============================================================================

/// Builds report messages for pipeline events.
#[derive(Debug, Clone)]
pub struct DiagnosticFormatter {
    subsystem: String,
    uris: UriResolver,
}

impl DiagnosticFormatter {
    #[must_use]
    pub fn new(subsystem: impl Into<String>, uris: UriResolver) -> Self {
        Self {
            subsystem: subsystem.into(),
            uris,
        }
    }

    #[must_use]
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    /// Formats `event` using only the facts in `snapshot`.
    #[must_use]
    pub fn format(&self, event: &PipelineEvent, snapshot: &EnvironmentSnapshot) -> DiagnosticReport {
        let builder = MessageBuilder::new(&self.subsystem, event.label());
        let builder = match event {
            PipelineEvent::GifDecodeFailed(failure) => self.decode_failure(
                builder,
                failure,
                snapshot,
                event.is_missing_native_capability(),
            ),
            PipelineEvent::ImageDecodeFailed(failure) => {
                self.decode_failure(builder, failure, snapshot, false)
            }
            PipelineEvent::CacheInstallFailed { cause, cache_dir } => {
                let storage = snapshot.storage();
                builder
                    .segment(cause.kind())
                    .segment(cache_dir.display())
                    .optional("exceptionMessage", cause.message())
                    .section(
                        "sdcardState",
                        storage.map_or(MountState::Unknown, |storage| storage.state),
                    )
                    .optional(
                        "sdcardSize",
                        storage.and_then(|storage| storage.capacity()).map(|capacity| {
                            format!(
                                "{}/{}",
                                format_byte_size(capacity.available_bytes),
                                format_byte_size(capacity.total_bytes)
                            )
                        }),
                    )
            }
            PipelineEvent::ImageProcessFailed {
                cause,
                image_uri,
                processor_key,
            } => {
                let out_of_memory = cause.kind().is_out_of_memory();
                builder
                    .segment(processor_key)
                    .segment(self.uris.resolve(image_uri))
                    .optional("exceptionMessage", cause.message())
                    .section_if(out_of_memory, "memoryInfo", || memory_info(snapshot))
                    .section_if(out_of_memory, "memoryState", || SystemState(snapshot))
            }
            PipelineEvent::TileSortFailed {
                cause,
                tiles,
                used_fallback_sort,
            } => builder
                .segment(cause.kind())
                .optional("exceptionMessage", cause.message())
                .section_if(cause.kind().is_out_of_memory(), "memoryInfo", || {
                    memory_info(snapshot)
                })
                .section_if(*used_fallback_sort, "sortFallback", || "useLegacyMergeSort")
                .section("tiles", TileList(tiles)),
            PipelineEvent::BitmapReusedWhileDisplayed {
                request_uri,
                drawable,
            } => builder
                .segment(self.uris.resolve(request_uri))
                .section("drawable", drawable)
                .section("systemState", SystemState(snapshot)),
            PipelineEvent::BitmapReuseRejected {
                image_uri,
                image_width,
                image_height,
                src_rect,
                sample_size,
                reused_bitmap,
            } => builder
                .segment(self.uris.resolve(image_uri))
                .section("imageSize", format!("{image_width}x{image_height}"))
                .optional("srcRect", src_rect.as_ref())
                .section("inSampleSize", sample_size)
                .section("inBitmap", reused_bitmap)
                .section("systemState", SystemState(snapshot)),
            PipelineEvent::DownloadFailed { cause, request_uri } => builder
                .segment(cause.kind())
                .segment(self.uris.resolve(request_uri))
                .optional("exceptionMessage", cause.message()),
        };
        DiagnosticReport::new(builder.build(), event.cause().cloned())
    }

    fn decode_failure(
        &self,
        builder: MessageBuilder,
        failure: &DecodeFailure,
        snapshot: &EnvironmentSnapshot,
        with_abis: bool,
    ) -> MessageBuilder {
        let cause = &failure.cause;
        builder
            .segment(cause.kind())
            .segment(self.uris.resolve(&failure.request_uri))
            .optional("exceptionMessage", cause.message())
            .section_if(with_abis, "abiInfo", || {
                snapshot
                    .abis()
                    .map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
            })
            .section_if(cause.kind().is_out_of_memory(), "memoryInfo", || {
                memory_info(snapshot)
            })
            .section("imageInfo", ImageInfo(failure))
    }
}

fn memory_info(snapshot: &EnvironmentSnapshot) -> String {
    MemoryInfo(&snapshot.memory().copied().unwrap_or_default()).to_string()
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSYSTEM, UriResolver::default())
    }
}

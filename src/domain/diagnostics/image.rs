// SPDX-License-Identifier: MPL-2.0
//! Image geometry and bitmap descriptors carried by pipeline events.
//!
//! These are plain descriptions, not pixel buffers: the monitor only needs
//! enough to print what was being decoded or reused when something failed.

use std::fmt;

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned rectangle in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    #[must_use]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {} - {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

// =============================================================================
// TileInfo
// =============================================================================

/// One tile of a large image being decoded region by region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileInfo {
    /// Where the tile is drawn, in view coordinates.
    pub draw_rect: Rect,
    /// Which region of the source image it decodes.
    pub src_rect: Rect,
    /// Subsampling factor used for the region.
    pub in_sample_size: u32,
}

impl TileInfo {
    #[must_use]
    pub fn new(draw_rect: Rect, src_rect: Rect, in_sample_size: u32) -> Self {
        Self {
            draw_rect,
            src_rect,
            in_sample_size,
        }
    }
}

impl fmt::Display for TileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(drawRect:{},srcRect:{},inSampleSize:{})",
            self.draw_rect, self.src_rect, self.in_sample_size
        )
    }
}

// =============================================================================
// ColorConfig
// =============================================================================

/// Pixel storage layout of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorConfig {
    Alpha8,
    Rgb565,
    Argb4444,
    Argb8888,
    RgbaF16,
    Hardware,
    Unknown,
}

impl ColorConfig {
    /// Bytes used per pixel, if the layout is stored in addressable memory.
    #[must_use]
    pub fn bytes_per_pixel(self) -> Option<u64> {
        match self {
            ColorConfig::Alpha8 => Some(1),
            ColorConfig::Rgb565 | ColorConfig::Argb4444 => Some(2),
            ColorConfig::Argb8888 => Some(4),
            ColorConfig::RgbaF16 => Some(8),
            ColorConfig::Hardware | ColorConfig::Unknown => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ColorConfig::Alpha8 => "ALPHA_8",
            ColorConfig::Rgb565 => "RGB_565",
            ColorConfig::Argb4444 => "ARGB_4444",
            ColorConfig::Argb8888 => "ARGB_8888",
            ColorConfig::RgbaF16 => "RGBA_F16",
            ColorConfig::Hardware => "HARDWARE",
            ColorConfig::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// BitmapInfo
// =============================================================================

/// Size and layout of a decoded bitmap.
///
/// # Example
///
/// ```
/// use sketch_monitor::domain::diagnostics::{BitmapInfo, ColorConfig};
///
/// let info = BitmapInfo::new(100, 200, ColorConfig::Argb8888);
/// assert_eq!(info.byte_count, 80_000);
/// assert_eq!(info.to_string(), "100x200, 80000, ARGB_8888");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: u32,
    pub height: u32,
    pub byte_count: u64,
    pub config: ColorConfig,
}

impl BitmapInfo {
    /// Describes a bitmap, deriving its byte count from the color layout.
    ///
    /// Layouts without addressable memory report a byte count of zero; use
    /// [`BitmapInfo::with_byte_count`] when the real allocation size is known.
    #[must_use]
    pub fn new(width: u32, height: u32, config: ColorConfig) -> Self {
        let byte_count = config
            .bytes_per_pixel()
            .map_or(0, |bpp| u64::from(width) * u64::from(height) * bpp);
        Self {
            width,
            height,
            byte_count,
            config,
        }
    }

    #[must_use]
    pub fn with_byte_count(mut self, byte_count: u64) -> Self {
        self.byte_count = byte_count;
        self
    }
}

impl fmt::Display for BitmapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}, {}, {}",
            self.width, self.height, self.byte_count, self.config
        )
    }
}

// =============================================================================
// DrawableInfo
// =============================================================================

/// A displayed drawable and the bitmap backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawableInfo {
    /// Memory-cache key of the drawable.
    pub key: String,
    pub bitmap: BitmapInfo,
}

impl DrawableInfo {
    #[must_use]
    pub fn new(key: impl Into<String>, bitmap: BitmapInfo) -> Self {
        Self {
            key: key.into(),
            bitmap,
        }
    }
}

impl fmt::Display for DrawableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.key, self.bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_dimensions_and_display() {
        let rect = Rect::new(10, 20, 110, 220);
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 200);
        assert_eq!(rect.to_string(), "Rect(10, 20 - 110, 220)");
    }

    #[test]
    fn tile_display_lists_both_rects() {
        let tile = TileInfo::new(Rect::new(0, 0, 50, 50), Rect::new(0, 0, 200, 200), 4);
        assert_eq!(
            tile.to_string(),
            "(drawRect:Rect(0, 0 - 50, 50),srcRect:Rect(0, 0 - 200, 200),inSampleSize:4)"
        );
    }

    #[test]
    fn bitmap_byte_count_follows_config() {
        assert_eq!(BitmapInfo::new(10, 10, ColorConfig::Rgb565).byte_count, 200);
        assert_eq!(BitmapInfo::new(10, 10, ColorConfig::Alpha8).byte_count, 100);
        assert_eq!(BitmapInfo::new(10, 10, ColorConfig::RgbaF16).byte_count, 800);
        assert_eq!(BitmapInfo::new(10, 10, ColorConfig::Hardware).byte_count, 0);
    }

    #[test]
    fn bitmap_byte_count_does_not_overflow_u32() {
        let info = BitmapInfo::new(40_000, 40_000, ColorConfig::Argb8888);
        assert_eq!(info.byte_count, 6_400_000_000);
    }

    #[test]
    fn explicit_byte_count_overrides_derived() {
        let info = BitmapInfo::new(10, 10, ColorConfig::Hardware).with_byte_count(512);
        assert_eq!(info.to_string(), "10x10, 512, HARDWARE");
    }

    #[test]
    fn drawable_display_wraps_bitmap() {
        let drawable = DrawableInfo::new("thumb@a.png", BitmapInfo::new(2, 3, ColorConfig::Argb8888));
        assert_eq!(drawable.to_string(), "thumb@a.png(2x3, 24, ARGB_8888)");
    }
}

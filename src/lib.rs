// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
use nalgebra::Vector2;

/// 2D Point in pixel coordinates
pub type Point2i = Vector2<i32>;

/// The four corners of a simplified contour, in polygon order.
pub type QuadCorners = [Point2i; 4];

/// A convex four-vertex polygon recovered from one extraction pass.
///
/// Quadrilaterals are immutable once the extractor has produced them; the
/// convexity and minimum-area invariants are enforced at construction time
/// by [`core::extractor::QuadExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrilateral {
    pub corners: QuadCorners,
}

impl Quadrilateral {
    pub fn new(corners: QuadCorners) -> Self {
        Quadrilateral { corners }
    }

    /// Builds a quadrilateral from a simplified polygon, if it has exactly 4 vertices.
    pub fn from_polygon(poly: &[Point2i]) -> Option<Self> {
        let corners: QuadCorners = poly.try_into().ok()?;
        Some(Quadrilateral { corners })
    }

    pub fn corners(&self) -> &QuadCorners {
        &self.corners
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> f64 {
        cv::geometry::contour_area(&self.corners).abs()
    }

    pub fn perimeter(&self) -> f64 {
        cv::geometry::perimeter(&self.corners)
    }
}

/// Candidate quadrilaterals in pass order (channel-major, then threshold level).
pub type CandidateSet = Vec<Quadrilateral>;

/// Zero-copy single-plane image buffer for JS/Native interop.
///
/// # Fields
/// * `data` - A slice representing a 1D contiguous array of 8-bit pixels.
/// * `width` - The logical width of the frame in pixels.
/// * `height` - The logical height of the frame in pixels.
pub struct ImageBuffer<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Zero-copy interleaved color image (BGR, RGB or RGBA).
///
/// # Fields
/// * `data` - Interleaved samples, `channels` bytes per pixel, rows tightly packed.
/// * `width` - The logical width of the frame in pixels.
/// * `height` - The logical height of the frame in pixels.
/// * `channels` - Samples per pixel. Only the first three are swept.
pub struct ColorBuffer<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl ColorBuffer<'_> {
    /// `width * height`, saturating. Exact for any buffer that passed [`Self::validate`].
    pub fn pixel_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Checks that `data` holds exactly `width * height * channels` samples
    /// and that there are at least three color channels.
    pub fn validate(&self) -> Result<()> {
        if self.channels < 3 {
            return Err(CubeError::UnsupportedChannels(self.channels));
        }
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(self.channels as usize))
            .ok_or(CubeError::ImageTooLarge {
                width: self.width,
                height: self.height,
                channels: self.channels,
            })?;
        if self.data.len() != expected {
            return Err(CubeError::InvalidBuffer {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Possible errors during extraction or configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CubeError {
    #[error("image buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },
    #[error("{width}x{height}x{channels} image does not fit in memory")]
    ImageTooLarge {
        width: u32,
        height: u32,
        channels: u32,
    },
    #[error("expected at least 3 color channels, got {0}")]
    UnsupportedChannels(u32),
    #[error("invalid extractor parameters: {0}")]
    InvalidParams(String),
}

pub type Result<T> = std::result::Result<T, CubeError>;

pub mod core;
pub mod cv;
pub mod report;
pub mod simd;

#[cfg(feature = "wasm")]
pub mod wasm_bridge;

// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/cv/mod.rs

use crate::cv::contours::Contour;
use crate::{ColorBuffer, ImageBuffer, Point2i};

/// Vision primitives consumed by the quadrilateral extractor.
/// The extractor never touches pixels directly; every image operation goes
/// through this trait so that alternative back-ends (Scalar, SIMD) can be
/// swapped in without changing the detection logic.
pub trait ComputerVision {
    /// Median-filters every channel of an interleaved color image.
    ///
    /// # Arguments
    /// * `src` - The source `ColorBuffer`.
    /// * `dst` - Destination with the same interleaved layout as `src`. Must be pre-allocated.
    /// * `kernel_size` - Odd side length of the square window. Borders are replicated.
    fn median_blur(src: &ColorBuffer, dst: &mut [u8], kernel_size: usize);

    /// Copies one channel of an interleaved color image into a single plane.
    ///
    /// # Arguments
    /// * `src` - The source `ColorBuffer`.
    /// * `channel` - Index of the channel to extract, `< src.channels`.
    /// * `dst` - Destination plane of `width * height` bytes.
    fn extract_channel(src: &ColorBuffer, channel: usize, dst: &mut [u8]);

    /// Canny edge detector with hysteresis.
    ///
    /// # Arguments
    /// * `src` - The single-plane source image.
    /// * `dst` - Binary output (0 or 255), same size as `src`.
    /// * `low` - Lower hysteresis threshold on the L1 gradient magnitude.
    /// * `high` - Upper hysteresis threshold; pixels above it seed edges.
    /// * `aperture` - Sobel aperture size (3, 5 or 7).
    fn canny(src: &ImageBuffer, dst: &mut [u8], low: f64, high: f64, aperture: usize);

    /// One pass of binary dilation with a 3x3 rectangular structuring element.
    ///
    /// # Arguments
    /// * `src` - Binary source image, non-zero pixels are foreground.
    /// * `dst` - Binary output (0 or 255).
    fn dilate(src: &ImageBuffer, dst: &mut [u8]);

    /// Binary mask of pixels at or above `level`.
    ///
    /// # Arguments
    /// * `src` - The source slice of single-plane pixels.
    /// * `dst` - Destination slice: 255 where `src >= level`, 0 elsewhere.
    /// * `level` - Inclusive intensity cut.
    fn threshold_at(src: &[u8], dst: &mut [u8], level: u8);

    /// Traces every outer and hole border of a binary image as a flat list.
    fn trace_contours(src: &ImageBuffer) -> Vec<Contour>;

    /// Closed-polygon Douglas-Peucker simplification.
    fn simplify(points: &[Point2i], epsilon: f64) -> Vec<Point2i>;

    /// Signed shoelace area of a closed polygon.
    fn area(points: &[Point2i]) -> f64;

    /// True if the closed polygon is strictly convex.
    fn is_convex(points: &[Point2i]) -> bool;

    /// Length of the closed polygon outline.
    fn perimeter(points: &[Point2i]) -> f64;
}

// Submodules for specific CV algorithms
pub mod contours;
pub mod geometry;
pub mod scalar;

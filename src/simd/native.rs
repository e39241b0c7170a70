// src/simd/native.rs

use crate::cv::contours::Contour;
use crate::cv::scalar::ScalarCV;
use crate::cv::ComputerVision;
use crate::{ColorBuffer, ImageBuffer, Point2i};

#[cfg(target_arch = "x86_64")]
use safe_arch::*;

/// Native SIMD implementation of Computer Vision operations.
/// Only the per-pass threshold runs vectorised; everything else defers to
/// [`ScalarCV`] so that both back-ends produce identical candidate sets.
pub struct NativeCV;

impl ComputerVision for NativeCV {
    fn median_blur(src: &ColorBuffer, dst: &mut [u8], kernel_size: usize) {
        ScalarCV::median_blur(src, dst, kernel_size)
    }

    fn extract_channel(src: &ColorBuffer, channel: usize, dst: &mut [u8]) {
        ScalarCV::extract_channel(src, channel, dst)
    }

    fn canny(src: &ImageBuffer, dst: &mut [u8], low: f64, high: f64, aperture: usize) {
        ScalarCV::canny(src, dst, low, high, aperture)
    }

    fn dilate(src: &ImageBuffer, dst: &mut [u8]) {
        ScalarCV::dilate(src, dst)
    }

    /// Binary mask of pixels at or above `level`, 16 pixels per SSE2 compare.
    fn threshold_at(src: &[u8], dst: &mut [u8], level: u8) {
        let len = src.len().min(dst.len());
        if level == 0 {
            dst[..len].fill(255);
            return;
        }

        #[allow(unused_mut)]
        let mut i = 0;

        #[cfg(target_arch = "x86_64")]
        {
            // SSE2 only has a signed byte compare, so both sides are shifted
            // by -128 and `v >= level` becomes `v - 128 > level - 1 - 128`.
            let offset = set_splat_i8_m128i(-128i8);
            let cut = add_i8_m128i(set_splat_i8_m128i((level - 1) as i8), offset);

            while i + 16 <= len {
                let (Ok(src_chunk), Ok(dst_chunk)) = (
                    <&[u8; 16]>::try_from(&src[i..i + 16]),
                    <&mut [u8; 16]>::try_from(&mut dst[i..i + 16]),
                ) else {
                    break;
                };
                let data = add_i8_m128i(load_unaligned_m128i(src_chunk), offset);
                store_unaligned_m128i(dst_chunk, cmp_gt_mask_i8_m128i(data, cut));
                i += 16;
            }
        }

        // Process remaining pixels
        ScalarCV::threshold_at(&src[i..len], &mut dst[i..len], level);
    }

    fn trace_contours(src: &ImageBuffer) -> Vec<Contour> {
        ScalarCV::trace_contours(src)
    }

    fn simplify(points: &[Point2i], epsilon: f64) -> Vec<Point2i> {
        ScalarCV::simplify(points, epsilon)
    }

    fn area(points: &[Point2i]) -> f64 {
        ScalarCV::area(points)
    }

    fn is_convex(points: &[Point2i]) -> bool {
        ScalarCV::is_convex(points)
    }

    fn perimeter(points: &[Point2i]) -> f64 {
        ScalarCV::perimeter(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_threshold_matches_scalar() {
        let src: Vec<u8> = (0..=255u8).chain(0..=100u8).collect();

        for level in [0u8, 1, 51, 102, 127, 128, 153, 204, 255] {
            let mut simd = vec![0u8; src.len()];
            let mut scalar = vec![0u8; src.len()];

            NativeCV::threshold_at(&src, &mut simd, level);
            ScalarCV::threshold_at(&src, &mut scalar, level);

            assert_eq!(simd, scalar, "level {level}");
        }
    }

    #[test]
    fn test_native_threshold_short_input() {
        let src = [10u8, 200, 30];
        let mut dst = [0u8; 3];

        NativeCV::threshold_at(&src, &mut dst, 30);
        assert_eq!(dst, [0, 255, 255]);
    }
}

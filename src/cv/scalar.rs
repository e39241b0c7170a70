// src/cv/scalar.rs

use crate::cv::contours::{self, Contour};
use crate::cv::{geometry, ComputerVision};
use crate::{ColorBuffer, ImageBuffer, Point2i};

/// tan(22.5 deg), boundary between horizontal and diagonal gradient sectors.
const TAN_22_5: f64 = 0.414_213_562_373_095_1;
/// tan(67.5 deg), boundary between diagonal and vertical gradient sectors.
const TAN_67_5: f64 = 2.414_213_562_373_095;

/// Scalar (non-SIMD) implementation of Computer Vision operations.
pub struct ScalarCV;

/// Separable Sobel kernels `(smoothing, derivative)` for an odd aperture.
///
/// The smoothing kernel is the binomial row of order `aperture - 1`; the
/// derivative kernel is the binomial row of order `aperture - 3` convolved
/// with `[-1, 0, 1]`.
pub fn sobel_kernels(aperture: usize) -> (Vec<i32>, Vec<i32>) {
    fn binomial(order: usize) -> Vec<i32> {
        let mut row = vec![1i32];
        for _ in 0..order {
            let mut next = vec![0i32; row.len() + 1];
            for (i, &v) in row.iter().enumerate() {
                next[i] += v;
                next[i + 1] += v;
            }
            row = next;
        }
        row
    }

    let aperture = aperture.max(3);
    let smooth = binomial(aperture - 1);
    let base = binomial(aperture - 3);
    let mut deriv = vec![0i32; base.len() + 2];
    for (i, &v) in base.iter().enumerate() {
        deriv[i] -= v;
        deriv[i + 2] += v;
    }
    (smooth, deriv)
}

/// Correlates every row with `kernel`, replicating edge pixels.
fn filter_rows(src: &[i32], width: usize, height: usize, kernel: &[i32]) -> Vec<i32> {
    let radius = (kernel.len() / 2) as isize;
    let last = width as isize - 1;
    let mut dst = vec![0i32; width * height];

    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0;
            for (k, &coef) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - radius).clamp(0, last) as usize;
                acc += coef * row[sx];
            }
            dst[y * width + x] = acc;
        }
    }
    dst
}

/// Correlates every column with `kernel`, replicating edge pixels.
fn filter_cols(src: &[i32], width: usize, height: usize, kernel: &[i32]) -> Vec<i32> {
    let radius = (kernel.len() / 2) as isize;
    let last = height as isize - 1;
    let mut dst = vec![0i32; width * height];

    for y in 0..height {
        for x in 0..width {
            let mut acc = 0;
            for (k, &coef) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - radius).clamp(0, last) as usize;
                acc += coef * src[sy * width + x];
            }
            dst[y * width + x] = acc;
        }
    }
    dst
}

impl ComputerVision for ScalarCV {
    /// Sliding-histogram median filter, one pass per channel.
    fn median_blur(src: &ColorBuffer, dst: &mut [u8], kernel_size: usize) {
        let width = src.width as usize;
        let height = src.height as usize;
        let channels = src.channels as usize;
        if width == 0 || height == 0 {
            return;
        }

        let radius = (kernel_size / 2) as isize;
        let window = (2 * radius + 1) as usize;
        let rank = (window * window) / 2 + 1;
        let clamp_x = |x: isize| x.clamp(0, width as isize - 1) as usize;
        let clamp_y = |y: isize| y.clamp(0, height as isize - 1) as usize;
        let sample = |x: usize, y: usize, c: usize| src.data[(y * width + x) * channels + c];

        for c in 0..channels {
            for y in 0..height {
                let mut hist = [0u32; 256];
                for dy in -radius..=radius {
                    let sy = clamp_y(y as isize + dy);
                    for dx in -radius..=radius {
                        hist[sample(clamp_x(dx), sy, c) as usize] += 1;
                    }
                }

                for x in 0..width {
                    let mut seen = 0;
                    let mut median = 0u8;
                    for (value, &count) in hist.iter().enumerate() {
                        seen += count as usize;
                        if seen >= rank {
                            median = value as u8;
                            break;
                        }
                    }
                    dst[(y * width + x) * channels + c] = median;

                    if x + 1 < width {
                        let leaving = clamp_x(x as isize - radius);
                        let entering = clamp_x(x as isize + radius + 1);
                        for dy in -radius..=radius {
                            let sy = clamp_y(y as isize + dy);
                            hist[sample(leaving, sy, c) as usize] -= 1;
                            hist[sample(entering, sy, c) as usize] += 1;
                        }
                    }
                }
            }
        }
    }

    fn extract_channel(src: &ColorBuffer, channel: usize, dst: &mut [u8]) {
        let channels = src.channels as usize;
        for (out, pixel) in dst.iter_mut().zip(src.data.chunks_exact(channels)) {
            *out = pixel[channel];
        }
    }

    /// Sobel gradients, L1 magnitude, non-maximum suppression and hysteresis.
    fn canny(src: &ImageBuffer, dst: &mut [u8], low: f64, high: f64, aperture: usize) {
        let width = src.width as usize;
        let height = src.height as usize;
        let len = width * height;
        if len == 0 {
            return;
        }

        let (smooth, deriv) = sobel_kernels(aperture);
        let plane: Vec<i32> = src.data[..len].iter().map(|&v| v as i32).collect();
        let gx = filter_rows(&filter_cols(&plane, width, height, &smooth), width, height, &deriv);
        let gy = filter_cols(&filter_rows(&plane, width, height, &smooth), width, height, &deriv);
        let mag: Vec<i32> = gx.iter().zip(&gy).map(|(x, y)| x.abs() + y.abs()).collect();

        let mag_at = |x: isize, y: isize| -> i32 {
            if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
                0
            } else {
                mag[y as usize * width + x as usize]
            }
        };

        // 0 = not an edge, 1 = weak candidate, 2 = strong edge
        let mut label = vec![0u8; len];
        let mut stack = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                let m = mag[i];
                if (m as f64) <= low {
                    continue;
                }

                let (xi, yi) = (x as isize, y as isize);
                let ax = gx[i].abs() as f64;
                let ay = gy[i].abs() as f64;

                let is_max = if ay < ax * TAN_22_5 {
                    m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
                } else if ay > ax * TAN_67_5 {
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s = if (gx[i] < 0) != (gy[i] < 0) { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                };

                if !is_max {
                    continue;
                }

                if (m as f64) > high {
                    label[i] = 2;
                    stack.push(i);
                } else {
                    label[i] = 1;
                }
            }
        }

        while let Some(i) = stack.pop() {
            let (x, y) = ((i % width) as isize, (i / width) as isize);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                        continue;
                    }
                    let n = ny as usize * width + nx as usize;
                    if label[n] == 1 {
                        label[n] = 2;
                        stack.push(n);
                    }
                }
            }
        }

        for (out, &l) in dst.iter_mut().zip(&label) {
            *out = if l == 2 { 255 } else { 0 };
        }
    }

    fn dilate(src: &ImageBuffer, dst: &mut [u8]) {
        let width = src.width as usize;
        let height = src.height as usize;

        for y in 0..height {
            let y0 = y.saturating_sub(1);
            let y1 = (y + 1).min(height - 1);
            for x in 0..width {
                let x0 = x.saturating_sub(1);
                let x1 = (x + 1).min(width - 1);

                let any_set = (y0..=y1)
                    .any(|ny| src.data[ny * width + x0..=ny * width + x1].iter().any(|&v| v != 0));
                dst[y * width + x] = if any_set { 255 } else { 0 };
            }
        }
    }

    fn threshold_at(src: &[u8], dst: &mut [u8], level: u8) {
        for (out, &v) in dst.iter_mut().zip(src) {
            *out = if v >= level { 255 } else { 0 };
        }
    }

    fn trace_contours(src: &ImageBuffer) -> Vec<Contour> {
        contours::trace_contours(src)
    }

    fn simplify(points: &[Point2i], epsilon: f64) -> Vec<Point2i> {
        geometry::approx_poly_dp(points, epsilon)
    }

    fn area(points: &[Point2i]) -> f64 {
        geometry::contour_area(points)
    }

    fn is_convex(points: &[Point2i]) -> bool {
        geometry::is_contour_convex(points)
    }

    fn perimeter(points: &[Point2i]) -> f64 {
        geometry::perimeter(points)
    }
}

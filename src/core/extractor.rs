// src/core/extractor.rs

use log::{debug, warn};

use crate::core::params::ExtractorParams;
use crate::cv::contours::Contour;
use crate::cv::ComputerVision;
use crate::{CandidateSet, ColorBuffer, ImageBuffer, Point2i, Quadrilateral, Result};

/// Color channels swept per image.
pub const SWEPT_CHANNELS: usize = 3;

/// Multi-channel, multi-threshold quadrilateral sweep.
pub struct QuadExtractor<CV: ComputerVision> {
    pub cv: CV,
    params: ExtractorParams,
}

impl<CV: ComputerVision> QuadExtractor<CV> {
    /// Creates an extractor after checking `params`.
    pub fn new(cv: CV, params: ExtractorParams) -> Result<Self> {
        params.validate()?;
        Ok(QuadExtractor { cv, params })
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    /// Primary pipeline: Median Blur -> (per channel, per level) Canny+Dilate or
    /// Threshold -> Trace Contours -> Simplify -> Filter Quadrilaterals.
    ///
    /// Candidates are appended in pass order and never deduplicated; the same
    /// face usually shows up once per channel and per level that isolates it.
    pub fn extract(&self, image: &ColorBuffer) -> Result<CandidateSet> {
        image.validate()?;

        let mut candidates = CandidateSet::new();
        if image.is_empty() {
            warn!("skipping empty {}x{} image", image.width, image.height);
            return Ok(candidates);
        }

        let width = image.width;
        let height = image.height;
        let len = image.pixel_count();

        // 1. Median blur
        let mut blurred = vec![0u8; image.data.len()];
        CV::median_blur(image, &mut blurred, self.params.median_kernel);
        let blurred = ColorBuffer {
            data: &blurred,
            width,
            height,
            channels: image.channels,
        };

        let mut plane = vec![0u8; len];
        let mut edges = vec![0u8; len];
        let mut binary = vec![0u8; len];

        for channel in 0..SWEPT_CHANNELS {
            // 2. Single color plane
            CV::extract_channel(&blurred, channel, &mut plane);
            let plane_buf = ImageBuffer {
                data: &plane,
                width,
                height,
            };

            for level in 0..self.params.levels {
                // 3. Binary image for this pass
                if level == 0 {
                    CV::canny(
                        &plane_buf,
                        &mut edges,
                        self.params.canny_low,
                        self.params.canny_high,
                        self.params.canny_aperture,
                    );
                    let edges_buf = ImageBuffer {
                        data: &edges,
                        width,
                        height,
                    };
                    CV::dilate(&edges_buf, &mut binary);
                } else {
                    CV::threshold_at(&plane, &mut binary, self.params.threshold_level(level));
                }

                // 4. Contours
                let binary_buf = ImageBuffer {
                    data: &binary,
                    width,
                    height,
                };
                let contours = CV::trace_contours(&binary_buf);

                // 5. Quadrilaterals
                let before = candidates.len();
                self.collect_quads(&contours, &mut candidates);
                debug!(
                    "channel {channel} level {level}: {} contours, {} quadrilaterals",
                    contours.len(),
                    candidates.len() - before
                );
            }
        }

        debug!("{} candidate quadrilaterals", candidates.len());
        Ok(candidates)
    }

    fn collect_quads(&self, contours: &[Contour], candidates: &mut CandidateSet) {
        candidates.extend(contours.iter().filter_map(|c| self.accept_contour(&c.points)));
    }

    /// Simplifies a contour and keeps it only if it is a large convex quadrilateral.
    pub fn accept_contour(&self, points: &[Point2i]) -> Option<Quadrilateral> {
        let epsilon = CV::perimeter(points) * self.params.approx_epsilon_factor;
        let poly = CV::simplify(points, epsilon);

        if poly.len() != 4
            || CV::area(&poly).abs() <= self.params.min_area
            || !CV::is_convex(&poly)
        {
            return None;
        }

        Quadrilateral::from_polygon(&poly)
    }
}

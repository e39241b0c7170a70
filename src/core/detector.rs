// src/core/detector.rs

use log::debug;

use crate::core::cube::{find_cube, CubeVerdict};
use crate::core::extractor::QuadExtractor;
use crate::core::params::ExtractorParams;
use crate::cv::ComputerVision;
use crate::{CandidateSet, ColorBuffer, Result};

/// Everything learned from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub candidates: CandidateSet,
    pub verdict: CubeVerdict,
}

/// Cube detector: quadrilateral sweep followed by the edge-sharing triple search.
pub struct CubeDetector<CV: ComputerVision> {
    extractor: QuadExtractor<CV>,
}

impl<CV: ComputerVision> CubeDetector<CV> {
    pub fn new(cv: CV, params: ExtractorParams) -> Result<Self> {
        Ok(CubeDetector {
            extractor: QuadExtractor::new(cv, params)?,
        })
    }

    pub fn extractor(&self) -> &QuadExtractor<CV> {
        &self.extractor
    }

    /// Primary pipeline: Extract Candidates -> Find Cube
    pub fn analyze(&self, image: &ColorBuffer) -> Result<Analysis> {
        let candidates = self.extractor.extract(image)?;
        let verdict = find_cube(&candidates);
        debug!(
            "{} candidates, cube faces {:?}",
            candidates.len(),
            verdict.faces
        );
        Ok(Analysis {
            candidates,
            verdict,
        })
    }

    /// Shorthand for `analyze(image)?.verdict.is_cube()`.
    pub fn detect(&self, image: &ColorBuffer) -> Result<bool> {
        Ok(self.analyze(image)?.verdict.is_cube())
    }
}

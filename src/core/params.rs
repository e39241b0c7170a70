// src/core/params.rs

use serde::{Deserialize, Serialize};

use crate::{CubeError, Result};

/// Parameters of one extraction run.
///
/// Every field has a default, so a JSON file only needs to list the values it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    /// Side of the median window applied before any edge work (odd, >= 3).
    pub median_kernel: usize,
    /// Lower Canny hysteresis threshold.
    pub canny_low: f64,
    /// Upper Canny hysteresis threshold.
    pub canny_high: f64,
    /// Sobel aperture used by Canny (3, 5 or 7).
    pub canny_aperture: usize,
    /// Passes per channel: one Canny pass plus `levels - 1` intensity cuts.
    pub levels: usize,
    /// Simplification tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_factor: f64,
    /// Quadrilaterals whose unsigned area does not exceed this are noise.
    pub min_area: f64,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            median_kernel: 9,
            canny_low: 5.0,
            canny_high: 50.0,
            canny_aperture: 5,
            levels: 5,
            approx_epsilon_factor: 0.02,
            min_area: 1000.0,
        }
    }
}

impl ExtractorParams {
    pub fn validate(&self) -> Result<()> {
        if self.levels == 0 {
            return Err(CubeError::InvalidParams("levels must be at least 1".into()));
        }
        if self.median_kernel < 3 || self.median_kernel % 2 == 0 {
            return Err(CubeError::InvalidParams(format!(
                "median_kernel must be odd and >= 3, got {}",
                self.median_kernel
            )));
        }
        if !matches!(self.canny_aperture, 3 | 5 | 7) {
            return Err(CubeError::InvalidParams(format!(
                "canny_aperture must be 3, 5 or 7, got {}",
                self.canny_aperture
            )));
        }
        if self.canny_low > self.canny_high {
            return Err(CubeError::InvalidParams(format!(
                "canny_low ({}) exceeds canny_high ({})",
                self.canny_low, self.canny_high
            )));
        }
        if self.approx_epsilon_factor.is_nan() || self.approx_epsilon_factor <= 0.0 {
            return Err(CubeError::InvalidParams(
                "approx_epsilon_factor must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Intensity cut for threshold pass `level` (1..levels).
    pub fn threshold_level(&self, level: usize) -> u8 {
        ((level + 1) * 255 / self.levels).min(255) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = ExtractorParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.levels, 5);
        assert_eq!(params.canny_high, 50.0);
    }

    #[test]
    fn threshold_levels_follow_pass_index() {
        let params = ExtractorParams::default();
        let cuts: Vec<u8> = (1..params.levels).map(|l| params.threshold_level(l)).collect();
        assert_eq!(cuts, vec![102, 153, 204, 255]);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            ExtractorParams {
                levels: 0,
                ..Default::default()
            },
            ExtractorParams {
                median_kernel: 8,
                ..Default::default()
            },
            ExtractorParams {
                canny_aperture: 4,
                ..Default::default()
            },
            ExtractorParams {
                canny_low: 80.0,
                ..Default::default()
            },
            ExtractorParams {
                approx_epsilon_factor: 0.0,
                ..Default::default()
            },
        ];
        for params in bad {
            assert!(
                matches!(params.validate(), Err(CubeError::InvalidParams(_))),
                "{params:?} should be rejected"
            );
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: ExtractorParams =
            serde_json::from_str(r#"{ "canny_high": 80.0, "levels": 3 }"#).expect("valid json");
        assert_eq!(params.canny_high, 80.0);
        assert_eq!(params.levels, 3);
        assert_eq!(params.median_kernel, 9);
        assert_eq!(params.min_area, 1000.0);
    }
}

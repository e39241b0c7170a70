#![cfg(target_arch = "wasm32")]
#![cfg(feature = "wasm")]

use crate::core::detector::CubeDetector;
use crate::core::params::ExtractorParams;
use crate::cv::scalar::ScalarCV;
use crate::report::AnalysisReport;
use crate::ColorBuffer;
use wasm_bindgen::prelude::*;

/// JS-facing Detector
#[wasm_bindgen]
pub struct CubeDetectorJs {
    detector: CubeDetector<ScalarCV>,
}

#[wasm_bindgen]
impl CubeDetectorJs {
    #[wasm_bindgen(constructor)]
    pub fn new(canny_high: Option<f64>, levels: Option<u32>) -> Result<CubeDetectorJs, JsValue> {
        let mut params = ExtractorParams::default();
        if let Some(high) = canny_high {
            params.canny_high = high;
        }
        if let Some(levels) = levels {
            params.levels = levels as usize;
        }

        let detector = CubeDetector::new(ScalarCV, params)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(CubeDetectorJs { detector })
    }

    /// Primary detection endpoint avoiding memory copies.
    /// `image_data` is interleaved, `channels` bytes per pixel (3 or 4 for canvas RGBA).
    pub fn detect_image(
        &self,
        width: u32,
        height: u32,
        image_data: &[u8],
        channels: u32,
    ) -> Result<JsValue, JsValue> {
        let buffer = ColorBuffer {
            data: image_data,
            width,
            height,
            channels,
        };

        let analysis = self
            .detector
            .analyze(&buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let report = AnalysisReport::new("", &analysis);

        serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

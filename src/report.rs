// src/report.rs

use serde::Serialize;

use crate::core::detector::Analysis;
use crate::Quadrilateral;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadReport {
    pub corners: [[i32; 2]; 4],
    pub area: f64,
}

impl From<&Quadrilateral> for QuadReport {
    fn from(quad: &Quadrilateral) -> Self {
        QuadReport {
            corners: quad.corners.map(|p| [p.x, p.y]),
            area: quad.area(),
        }
    }
}

/// Serializable view of an [`Analysis`], shared by the CLI and the WASM bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Image label (usually the file name); empty when unknown.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    pub cube_detected: bool,
    /// Indices into `quadrilaterals` of the supporting faces.
    pub faces: Option<[usize; 3]>,
    pub quadrilaterals: Vec<QuadReport>,
}

impl AnalysisReport {
    pub fn new(source: impl Into<String>, analysis: &Analysis) -> Self {
        AnalysisReport {
            source: source.into(),
            cube_detected: analysis.verdict.is_cube(),
            faces: analysis.verdict.faces,
            quadrilaterals: analysis.candidates.iter().map(QuadReport::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cube::CubeVerdict;
    use crate::Point2i;

    #[test]
    fn report_serializes_corners_and_verdict() {
        let quad = Quadrilateral::new([
            Point2i::new(0, 0),
            Point2i::new(40, 0),
            Point2i::new(40, 30),
            Point2i::new(0, 30),
        ]);
        let analysis = Analysis {
            candidates: vec![quad],
            verdict: CubeVerdict::default(),
        };

        let report = AnalysisReport::new("", &analysis);
        let json = serde_json::to_value(&report).expect("serializable");

        assert_eq!(json["cube_detected"], false);
        assert!(json["faces"].is_null());
        assert!(json.get("source").is_none());
        assert_eq!(json["quadrilaterals"][0]["corners"][2], serde_json::json!([40, 30]));
        assert_eq!(json["quadrilaterals"][0]["area"], 1200.0);
    }
}

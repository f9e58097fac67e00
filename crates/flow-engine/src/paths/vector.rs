//! Lyon-backed vector paths: curves, arcs and SVG path data.

use glam::Vec2;
use lyon::algorithms::measure::{PathMeasurements, SampleType};
use lyon::extra::parser::{ParserOptions, PathParser, Source};
use lyon::path::Path;

use super::FlowPath;
use crate::error::{FlowError, Result};

/// Flattening tolerance used when measuring curve length, in source units.
const MEASURE_TOLERANCE: f32 = 0.05;

/// A lyon path with precomputed arc-length measurements.
pub struct VectorPath {
    path: Path,
    measurements: PathMeasurements,
    length: f32,
}

impl VectorPath {
    /// Measure an already-built lyon path.
    pub fn new(path: Path) -> Self {
        let measurements = PathMeasurements::from_path(&path, MEASURE_TOLERANCE);
        let length = measurements
            .create_sampler(&path, SampleType::Distance)
            .length();
        Self {
            path,
            measurements,
            length,
        }
    }

    /// Parse the `d` attribute of an SVG `<path>` element.
    ///
    /// `id` only labels the error when parsing fails.
    pub fn from_svg_data(id: &str, data: &str) -> Result<Self> {
        let mut source = Source::new(data.chars());
        let mut parser = PathParser::new();
        let mut builder = Path::builder();
        parser
            .parse(&ParserOptions::DEFAULT, &mut source, &mut builder)
            .map_err(|e| FlowError::PathData {
                id: id.to_string(),
                message: format!("{:?}", e),
            })?;
        Ok(Self::new(builder.build()))
    }
}

impl FlowPath for VectorPath {
    fn length(&self) -> f32 {
        self.length
    }

    fn point_at(&self, offset: f32) -> Vec2 {
        if self.path.iter().next().is_none() {
            return Vec2::ZERO;
        }
        let mut sampler = self
            .measurements
            .create_sampler(&self.path, SampleType::Distance);
        let p = sampler.sample(offset.clamp(0.0, self.length)).position();
        Vec2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_measures_exactly() {
        let path = VectorPath::from_svg_data("line", "M 0 0 L 100 0").unwrap();
        assert!((path.length() - 100.0).abs() < 0.01);
        let mid = path.point_at(50.0);
        assert!((mid - Vec2::new(50.0, 0.0)).length() < 0.01);
    }

    #[test]
    fn svg_line_commands_parse() {
        let path = VectorPath::from_svg_data("edge", "M 0 0 L 30 40").unwrap();
        assert!((path.length() - 50.0).abs() < 0.01);
        let end = path.point_at(50.0);
        assert!((end - Vec2::new(30.0, 40.0)).length() < 0.01);
    }

    #[test]
    fn svg_curve_is_longer_than_chord() {
        let path = VectorPath::from_svg_data("arc", "M0,0 C0,100 100,100 100,0").unwrap();
        assert!(path.length() > 100.0);
    }

    #[test]
    fn malformed_svg_reports_id() {
        let err = VectorPath::from_svg_data("broken", "M 0 0 L banana").err().unwrap();
        match err {
            FlowError::PathData { id, .. } => assert_eq!(id, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn relative_and_smooth_commands_resolve() {
        let path = VectorPath::from_svg_data("smooth", "m 10 10 h 50 s 50 0 50 50").unwrap();
        assert!(path.length() > 100.0);
        let end = path.point_at(path.length());
        assert!((end - Vec2::new(110.0, 60.0)).length() < 0.05);
    }
}

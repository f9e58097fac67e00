//! Arc-length sampling of source paths into fixed point caches.

use glam::{Vec2, Vec3};

use crate::api::config::FlowConfig;
use crate::core::rng::Rng;
use crate::error::{FlowError, Result};
use crate::paths::FlowPath;

/// A sampled, re-centered path point. `z` is always 0.
pub type SampledPoint = Vec3;

/// Turns a path into `floor(length / stride)` points spaced evenly by arc length.
#[derive(Debug, Clone)]
pub struct PathSampler {
    stride: f32,
    center: Vec2,
    /// Per-axis jitter amplitude; `None` samples the exact curve.
    jitter: Option<f32>,
}

impl PathSampler {
    pub fn new(stride: f32, center_offset: [f32; 2]) -> Self {
        Self {
            stride,
            center: Vec2::from(center_offset),
            jitter: None,
        }
    }

    /// Add uniform noise in `[-amplitude, amplitude]` to x and y of every point.
    pub fn with_jitter(mut self, amplitude: f32) -> Self {
        self.jitter = (amplitude > 0.0).then_some(amplitude);
        self
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        let sampler = Self::new(config.stride, config.center_offset);
        if config.jitter {
            sampler.with_jitter(config.jitter_amplitude)
        } else {
            sampler
        }
    }

    /// Number of points a path of `length` produces.
    pub fn point_count(&self, length: f32) -> usize {
        if !(length.is_finite() && length > 0.0) {
            return 0;
        }
        (length / self.stride).floor() as usize
    }

    /// Check that a path's length is usable before sampling it.
    pub fn check_length(index: usize, length: f32) -> Result<f32> {
        if !length.is_finite() || length < 0.0 {
            return Err(FlowError::InvalidPath {
                index,
                reason: format!("length {} is not a finite, non-negative number", length),
            });
        }
        Ok(length)
    }

    /// Sample `path` once. `rng` is only drawn from when jitter is enabled.
    pub fn sample<P: FlowPath + ?Sized>(&self, path: &P, rng: &mut Rng) -> Vec<SampledPoint> {
        let length = path.length();
        let count = self.point_count(length);
        let mut points = Vec::with_capacity(count);

        for i in 0..count {
            let offset = length * i as f32 / count as f32;
            let mut p = path.point_at(offset) - self.center;
            if let Some(amplitude) = self.jitter {
                p.x += rng.symmetric(amplitude);
                p.y += rng.symmetric(amplitude);
            }
            points.push(p.extend(0.0));
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::Polyline;

    fn horizontal(length: f32) -> Polyline {
        Polyline::segment(Vec2::new(1024.0, 512.0), Vec2::new(1024.0 + length, 512.0))
    }

    #[test]
    fn point_count_is_floor_of_length_over_stride() {
        let sampler = PathSampler::new(5.0, [0.0, 0.0]);
        assert_eq!(sampler.point_count(500.0), 100);
        assert_eq!(sampler.point_count(504.9), 100);
        assert_eq!(sampler.point_count(5.0), 1);
        assert_eq!(sampler.point_count(4.99), 0);
        assert_eq!(sampler.point_count(f32::NAN), 0);
    }

    #[test]
    fn samples_are_centered_and_evenly_spaced() {
        let sampler = PathSampler::new(5.0, [1024.0, 512.0]);
        let points = sampler.sample(&horizontal(500.0), &mut Rng::new(1));
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], Vec3::ZERO);
        for (i, p) in points.iter().enumerate() {
            assert!((p.x - 5.0 * i as f32).abs() < 1e-3, "point {} at {}", i, p.x);
            assert_eq!(p.y, 0.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn short_path_yields_no_points() {
        let sampler = PathSampler::new(5.0, [1024.0, 512.0]);
        assert!(sampler.sample(&horizontal(3.0), &mut Rng::new(1)).is_empty());
    }

    #[test]
    fn samples_stay_inside_centered_domain() {
        let sampler = PathSampler::new(5.0, [1024.0, 512.0]);
        let square = Polyline::closed(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2048.0, 0.0),
            Vec2::new(2048.0, 1024.0),
            Vec2::new(0.0, 1024.0),
        ]);
        let points = sampler.sample(&square, &mut Rng::new(1));
        assert_eq!(points.len(), (6144.0f32 / 5.0).floor() as usize);
        for p in &points {
            assert!(p.x >= -1024.0 && p.x <= 1024.0);
            assert!(p.y >= -512.0 && p.y <= 512.0);
        }
    }

    #[test]
    fn jitter_is_bounded_and_reproducible() {
        let sampler = PathSampler::new(5.0, [1024.0, 512.0]).with_jitter(2.5);
        let exact = PathSampler::new(5.0, [1024.0, 512.0]).sample(&horizontal(200.0), &mut Rng::new(1));
        let a = sampler.sample(&horizontal(200.0), &mut Rng::new(9));
        let b = sampler.sample(&horizontal(200.0), &mut Rng::new(9));
        assert_eq!(a, b);
        assert_ne!(a, exact);
        for (j, e) in a.iter().zip(&exact) {
            assert!((j.x - e.x).abs() <= 2.5 + 1e-4);
            assert!((j.y - e.y).abs() <= 2.5 + 1e-4);
            assert_eq!(j.z, 0.0);
        }
    }

    #[test]
    fn config_toggles_jitter() {
        let config = FlowConfig { jitter: false, ..FlowConfig::default() };
        let exact = PathSampler::from_config(&config).sample(&horizontal(50.0), &mut Rng::new(3));
        assert_eq!(exact[1], Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_lengths_are_rejected() {
        assert!(PathSampler::check_length(0, 12.0).is_ok());
        assert!(PathSampler::check_length(0, 0.0).is_ok());
        assert!(matches!(
            PathSampler::check_length(3, f32::INFINITY),
            Err(FlowError::InvalidPath { index: 3, .. })
        ));
        assert!(PathSampler::check_length(1, -1.0).is_err());
    }
}

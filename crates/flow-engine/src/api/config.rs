use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};

/// Configuration for a flow field, provided by the sketch.
///
/// Every field has a serde default so a partial JSON object is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Arc-length distance between two sampled points (default: 5).
    pub stride: f32,
    /// Particles drawn per track each frame (default: 100).
    pub window_size: usize,
    /// Window offset `k` is drawn with opacity `k / opacity_divisor` (default: 1000).
    pub opacity_divisor: f32,
    /// Subtracted from every sampled point to center the source frame (default: 1024, 512).
    pub center_offset: [f32; 2],
    /// Whether sampled points get a one-time random offset.
    pub jitter: bool,
    /// Maximum jitter per axis in source units (default: 2.5).
    pub jitter_amplitude: f32,
    /// Seed for the jitter and speed generator.
    pub seed: u64,
    /// Points advanced per frame for every track (default: 1).
    pub base_speed: f32,
    /// Each track's speed is drawn from `base_speed ± speed_variance`.
    pub speed_variance: f32,
    /// Amount added to the `time` uniform every frame (default: 0.05).
    pub time_step: f32,
    /// Only paths carrying this class are loaded from a document. `None` loads all.
    pub path_class: Option<String>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            stride: 5.0,
            window_size: 100,
            opacity_divisor: 1000.0,
            center_offset: [1024.0, 512.0],
            jitter: true,
            jitter_amplitude: 2.5,
            seed: 42,
            base_speed: 1.0,
            speed_variance: 0.0,
            time_step: 0.05,
            path_class: Some("cls-1".to_string()),
        }
    }
}

impl FlowConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the sampler or driver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.stride.is_finite() && self.stride > 0.0) {
            return Err(FlowError::InvalidConfig(format!(
                "stride must be positive, got {}",
                self.stride
            )));
        }
        if self.window_size == 0 {
            return Err(FlowError::InvalidConfig("window_size must be at least 1".into()));
        }
        if !(self.opacity_divisor.is_finite() && self.opacity_divisor > 0.0) {
            return Err(FlowError::InvalidConfig(format!(
                "opacity_divisor must be positive, got {}",
                self.opacity_divisor
            )));
        }
        if !(self.jitter_amplitude.is_finite() && self.jitter_amplitude >= 0.0) {
            return Err(FlowError::InvalidConfig(format!(
                "jitter_amplitude must be non-negative, got {}",
                self.jitter_amplitude
            )));
        }
        if !(self.base_speed.is_finite() && self.speed_variance.is_finite()) {
            return Err(FlowError::InvalidConfig("speeds must be finite".into()));
        }
        if self.speed_variance < 0.0 || self.base_speed - self.speed_variance < 0.0 {
            return Err(FlowError::InvalidConfig(format!(
                "speed range {} ± {} dips below zero",
                self.base_speed, self.speed_variance
            )));
        }
        if !self.time_step.is_finite() {
            return Err(FlowError::InvalidConfig("time_step must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = FlowConfig::default();
        assert_eq!(config.stride, 5.0);
        assert_eq!(config.window_size, 100);
        assert_eq!(config.opacity_divisor, 1000.0);
        assert_eq!(config.center_offset, [1024.0, 512.0]);
        assert_eq!(config.jitter_amplitude, 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FlowConfig::from_json(r#"{ "window_size": 50, "jitter": false }"#).unwrap();
        assert_eq!(config.window_size, 50);
        assert!(!config.jitter);
        assert_eq!(config.stride, 5.0);
        assert_eq!(config.path_class.as_deref(), Some("cls-1"));
    }

    #[test]
    fn zero_stride_rejected() {
        let config = FlowConfig { stride: 0.0, ..FlowConfig::default() };
        assert!(matches!(config.validate(), Err(FlowError::InvalidConfig(_))));
    }

    #[test]
    fn zero_window_rejected() {
        let err = FlowConfig::from_json(r#"{ "window_size": 0 }"#).unwrap_err();
        assert!(matches!(err, FlowError::InvalidConfig(_)));
    }

    #[test]
    fn negative_speed_range_rejected() {
        let config = FlowConfig {
            base_speed: 0.5,
            speed_variance: 1.0,
            ..FlowConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_speed_allowed() {
        let config = FlowConfig { base_speed: 0.0, ..FlowConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = FlowConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, FlowError::Json(_)));
    }
}

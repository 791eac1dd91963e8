use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisConfigError {
    #[error("Sample rate cannot be zero")]
    ZeroSampleRate,
    #[error("Step size cannot be zero")]
    ZeroStepSize,
}

/// A spectral peak detected by the upstream analysis stage.
///
/// `t` is the index of the analysis frame the peak was found in, `f` the
/// frequency bin index within that frame's spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventPoint {
    pub t: u32,
    pub f: u32,
}

impl EventPoint {
    pub fn new(t: u32, f: u32) -> Self {
        Self { t, f }
    }
}

/// Sample rate of the upstream spectral analysis in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRate(u32);

impl SampleRate {
    pub const DEFAULT: Self = Self(8_000);

    pub fn new(hz: u32) -> Result<Self, AnalysisConfigError> {
        if hz == 0 {
            return Err(AnalysisConfigError::ZeroSampleRate);
        }
        Ok(Self(hz))
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Hop size of the upstream spectral analysis, in samples per frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSize(u32);

impl StepSize {
    pub const DEFAULT: Self = Self(256);

    pub fn new(samples: u32) -> Result<Self, AnalysisConfigError> {
        if samples == 0 {
            return Err(AnalysisConfigError::ZeroStepSize);
        }
        Ok(Self(samples))
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// The analysis parameters needed to express frame-unit offsets in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    sample_rate: SampleRate,
    step_size: StepSize,
}

impl AnalysisConfig {
    pub fn new(sample_rate: SampleRate, step_size: StepSize) -> Self {
        Self {
            sample_rate,
            step_size,
        }
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn step_size(&self) -> StepSize {
        self.step_size
    }

    /// Convert an offset in analysis frames to seconds.
    pub fn frames_to_seconds(&self, frames: i64) -> f64 {
        frames as f64 * self.step_size.raw() as f64 / self.sample_rate.raw() as f64
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(SampleRate::DEFAULT, StepSize::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_sample_rate_validation() {
        assert_matches!(SampleRate::new(0), Err(AnalysisConfigError::ZeroSampleRate));
        assert!(SampleRate::new(8_000).is_ok());
        assert_eq!(SampleRate::DEFAULT.raw(), 8_000);
    }

    #[test]
    fn test_step_size_validation() {
        assert_matches!(StepSize::new(0), Err(AnalysisConfigError::ZeroStepSize));
        assert!(StepSize::new(256).is_ok());
        assert_eq!(StepSize::DEFAULT.raw(), 256);
    }

    #[test]
    fn test_frames_to_seconds() {
        let config = AnalysisConfig::default();

        assert_eq!(config.frames_to_seconds(0), 0.0);
        // 256 samples per frame at 8 kHz: 32 ms per frame
        assert_eq!(config.frames_to_seconds(1), 0.032);
        assert_eq!(config.frames_to_seconds(-20), -0.64);
    }

    #[test]
    fn test_event_point_serialization() {
        let point = EventPoint::new(42, 117);
        let json = serde_json::to_string(&point).unwrap();
        let decoded: EventPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(point, decoded);
    }
}

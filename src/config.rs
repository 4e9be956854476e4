use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::ConfigError;
use crate::placement::PlacementOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Roll once at startup; stay up until dismissed.
    SingleShot,
    /// Roll every interval forever, auto-hiding after the dwell period.
    Continuous,
}

/// Validated probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probability(f64);

impl Probability {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::ProbabilityOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// A roll in `[0, 1)` hits when it is strictly below the probability.
    pub fn hits(self, roll: f64) -> bool {
        roll < self.0
    }
}

#[derive(Debug, Clone)]
pub struct ScareConfig {
    pub image_path: PathBuf,
    pub sound_path: Option<PathBuf>,
    pub probability: Probability,
    /// Seconds between checks, never below [`MIN_INTERVAL`].
    pub interval: f32,
    pub dwell: f32,
    pub mode: RunMode,
    pub placement: PlacementOptions,
    pub click_through: bool,
    pub volume: f32,
}

impl ScareConfig {
    pub fn new(image_path: impl Into<PathBuf>, sound_path: Option<PathBuf>, probability: f64, interval: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            image_path: image_path.into(),
            sound_path: sound_path.filter(|path| !is_no_sound(path)),
            probability: Probability::new(probability)?,
            interval: interval.max(MIN_INTERVAL),
            dwell: DWELL_DURATION,
            mode: RunMode::Continuous,
            placement: PlacementOptions::default(),
            click_through: true,
            volume: 1.0,
        })
    }

    pub fn with_dwell(mut self, dwell: f32) -> Result<Self, ConfigError> {
        if dwell.is_nan() || dwell <= 0.0 {
            return Err(ConfigError::InvalidDwell(dwell));
        }
        self.dwell = dwell;
        Ok(self)
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_placement(mut self, placement: PlacementOptions) -> Self {
        self.placement = placement;
        self
    }
}

// "none" and "" both mean no sound was configured
fn is_no_sound(path: &Path) -> bool {
    let raw = path.as_os_str().to_string_lossy();
    raw.is_empty() || raw.eq_ignore_ascii_case("none")
}

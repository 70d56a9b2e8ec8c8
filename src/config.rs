//! Classifier settings, read from TOML.

use serde::{Deserialize, Serialize};

use crate::emotion::INTENSITY_MAX;
use crate::error::{FuzzyError, Result};
use crate::latch::Memory;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Emotion intensity at or above which the label is animated.
    #[serde(default = "default_label_threshold")]
    pub label_threshold: f64,

    /// Energy above which the latch is set.
    #[serde(default = "default_set_energy")]
    pub set_energy: f64,

    /// Energy below which the latch is reset.
    #[serde(default = "default_reset_energy")]
    pub reset_energy: f64,

    /// Memory a batch starts from, within `[0, 1]`.
    #[serde(default = "default_initial_memory")]
    pub initial_memory: f64,
}

fn default_label_threshold() -> f64 {
    5.
}
fn default_set_energy() -> f64 {
    7.
}
fn default_reset_energy() -> f64 {
    3.
}
fn default_initial_memory() -> f64 {
    Memory::NEUTRAL.value()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            label_threshold: default_label_threshold(),
            set_energy: default_set_energy(),
            reset_energy: default_reset_energy(),
            initial_memory: default_initial_memory(),
        }
    }
}

impl ClassifierConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ClassifierConfig = toml::from_str(raw)?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.label_threshold, self.set_energy, self.reset_energy, self.initial_memory]
            .iter()
            .all(|v| v.is_finite());

        if !finite {
            return Err(FuzzyError::InvalidSettings("settings must be finite".to_owned()));
        }

        if !(0. ..=INTENSITY_MAX).contains(&self.label_threshold) {
            return Err(FuzzyError::InvalidSettings(format!(
                "label_threshold ({}) must lie within [0, {INTENSITY_MAX}]",
                self.label_threshold
            )));
        }

        if !(0. ..=1.).contains(&self.initial_memory) {
            return Err(FuzzyError::InvalidSettings(format!(
                "initial_memory ({}) must lie within [0, 1]",
                self.initial_memory
            )));
        }

        if self.reset_energy >= self.set_energy {
            return Err(FuzzyError::InvalidSettings(format!(
                "reset_energy ({}) must be below set_energy ({})",
                self.reset_energy, self.set_energy
            )));
        }

        Ok(())
    }

    pub fn initial_memory(&self) -> Memory {
        Memory::new(self.initial_memory)
    }

    /// Set and reset signals for the latch.
    pub(crate) fn latch_signals(&self, energy: f64) -> (f64, f64) {
        let set = if energy > self.set_energy { 1. } else { 0. };
        let reset = if energy < self.reset_energy { 1. } else { 0. };

        (set, reset)
    }
}

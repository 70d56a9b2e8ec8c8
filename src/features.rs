use serde::{Deserialize, Serialize};

/// Crisp acoustic features of one utterance, as produced by an external
/// extractor. Values outside the engines' universes are clamped, not rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Length of the utterance in seconds, on a 0 to 10 scale.
    pub duration: f64,
    /// Mean RMS energy scaled to 0 to 10.
    pub energy: f64,
    /// Estimated fundamental frequency in Hz.
    pub pitch: f64,
}

impl Features {
    pub fn new(duration: f64, energy: f64, pitch: f64) -> Self {
        Self {
            duration,
            energy,
            pitch,
        }
    }
}

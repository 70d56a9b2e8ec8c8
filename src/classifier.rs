use tracing::{debug, info};

use crate::command::{Command, CommandEngine, Inferred, SCALE_MAX};
use crate::config::ClassifierConfig;
use crate::emotion::{EmotionEngine, EmotionLabel, INTENSITY_MAX, PITCH_MAX, PITCH_MIN};
use crate::error::Result;
use crate::features::Features;
use crate::latch::{Memory, MemoryLatch};

/// Outcome of classifying one utterance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification<L> {
    pub label: L,
    /// Crisp output of the rule base.
    pub value: f64,
    /// Latch state to pass into the next call.
    pub memory: Memory,
    pub dominant_rule: Option<usize>,
}

/// Both rule bases and the latch, built once and shared across calls. The
/// classifier itself holds no per-call state: memory goes in and comes back
/// out with every call.
pub struct Classifier {
    command: CommandEngine,
    emotion: EmotionEngine,
    latch: MemoryLatch,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let classifier = Self {
            command: CommandEngine::new()?,
            emotion: EmotionEngine::new()?,
            latch: MemoryLatch::new()?,
            config,
        };

        info!(
            set_energy = classifier.config.set_energy,
            reset_energy = classifier.config.reset_energy,
            label_threshold = classifier.config.label_threshold,
            "classifier ready"
        );

        Ok(classifier)
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify_command(&self, features: &Features, memory: Memory) -> Result<Classification<Command>> {
        let features = clamp(features);
        let inferred = self.command.infer(&features, memory)?;
        let label = self.command.label(inferred.value)?;
        let classification = self.finish(label, inferred, &features, memory)?;

        debug!(?label, value = classification.value, memory = classification.memory.value(), "classified command");

        Ok(classification)
    }

    pub fn classify_emotion(&self, features: &Features, memory: Memory) -> Result<Classification<EmotionLabel>> {
        let features = clamp(features);
        let inferred = self.emotion.infer(&features, memory)?;
        let label = EmotionLabel::from_intensity(inferred.value, self.config.label_threshold);
        let classification = self.finish(label, inferred, &features, memory)?;

        debug!(?label, value = classification.value, memory = classification.memory.value(), "classified emotion");

        Ok(classification)
    }

    fn finish<L>(&self, label: L, inferred: Inferred, features: &Features, memory: Memory) -> Result<Classification<L>> {
        let (set, reset) = self.config.latch_signals(features.energy);
        let memory = self.latch.evaluate(memory, set, reset)?;

        Ok(Classification {
            label,
            value: inferred.value,
            memory,
            dominant_rule: inferred.dominant_rule,
        })
    }
}

fn clamp_to(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

fn clamp(features: &Features) -> Features {
    Features {
        duration: clamp_to(features.duration, 0., SCALE_MAX),
        energy: clamp_to(features.energy, 0., INTENSITY_MAX),
        pitch: clamp_to(features.pitch, PITCH_MIN, PITCH_MAX),
    }
}

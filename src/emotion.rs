//! Rule base mapping pitch, energy and the latched memory to an emotional
//! intensity on a 0 to 10 scale.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{energy_terms, Energy, Inferred};
use crate::error::{FuzzyError, Result};
use crate::features::Features;
use crate::latch::{Level, Memory};
use crate::rules::Rules;
use crate::system::ControlSystem;
use crate::terms::{Key, Terms};
use crate::variable::{Variable, Variables};

pub const PITCH_MIN: f64 = 50.;
pub const PITCH_MAX: f64 = 350.;
pub const INTENSITY_MAX: f64 = 10.;

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Pitch {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Emotion {
    Calm,
    Neutral,
    Animated,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EmotionTerm {
    Pitch(Pitch),
    Energy(Energy),
    Memory(Level),
    Emotion(Emotion),
}

impl From<Pitch> for EmotionTerm {
    fn from(p: Pitch) -> Self {
        Self::Pitch(p)
    }
}

impl From<Energy> for EmotionTerm {
    fn from(e: Energy) -> Self {
        Self::Energy(e)
    }
}

impl From<Level> for EmotionTerm {
    fn from(l: Level) -> Self {
        Self::Memory(l)
    }
}

impl From<Emotion> for EmotionTerm {
    fn from(e: Emotion) -> Self {
        Self::Emotion(e)
    }
}

/// Two-way reading of the intensity scale.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Calm,
    Animated,
}

impl EmotionLabel {
    /// `Animated` at or above `threshold`.
    pub fn from_intensity(intensity: f64, threshold: f64) -> Self {
        if intensity >= threshold {
            EmotionLabel::Animated
        } else {
            EmotionLabel::Calm
        }
    }
}

pub struct EmotionEngine {
    system: ControlSystem<EmotionTerm>,
    pitch: Variable<Pitch>,
    energy: Variable<Energy>,
    memory: Variable<Level>,
    emotion: Variable<Emotion>,
}

impl EmotionEngine {
    pub fn new() -> Result<Self> {
        let mut vars = Variables::<EmotionTerm>::new();
        let pitch = vars.add("pitch", PITCH_MIN..=PITCH_MAX, 1., pitch_terms()?)?;
        let energy = vars.add("energy", 0. ..=INTENSITY_MAX, 0.1, energy_terms()?)?;
        let memory = vars.add("memory", 0. ..=1., 0.01, memory_terms()?)?;
        let emotion = vars.add("emotion", 0. ..=INTENSITY_MAX, 0.1, emotion_terms()?)?;
        let mut rules = Rules::with_capacity(10);

        rules.add(
            pitch.is(Pitch::High).and2(energy.is(Energy::High), memory.is(Level::High)),
            emotion.is(Emotion::Animated),
        );
        rules.add(
            pitch.is(Pitch::High).or(energy.is(Energy::High)).and(memory.is(Level::Low)),
            emotion.is(Emotion::Neutral),
        );
        rules.add(pitch.is(Pitch::Medium).and(energy.is(Energy::Medium)), emotion.is(Emotion::Neutral));
        rules.add(pitch.is(Pitch::Low).and(energy.is(Energy::Low)), emotion.is(Emotion::Calm));
        rules.add(energy.is(Energy::Low).and(memory.is(Level::Low)), emotion.is(Emotion::Calm));
        rules.add(energy.is(Energy::High).and(memory.is(Level::High)), emotion.is(Emotion::Animated));
        rules.add(pitch.is(Pitch::Low).and(energy.is(Energy::Medium)), emotion.is(Emotion::Calm));
        rules.add(energy.is(Energy::Low).and(memory.is(Level::High)), emotion.is(Emotion::Neutral));
        rules.add(
            pitch.is(Pitch::High).and2(energy.is(Energy::Medium), memory.is(Level::High)),
            emotion.is(Emotion::Animated),
        );
        rules.add(
            vars.outside(pitch)?.or(vars.outside(energy)?).or(vars.outside(memory)?),
            emotion.is(Emotion::Calm),
        );

        let system = ControlSystem::new(vars, rules)?;

        system.check_coverage()?;

        Ok(Self {
            system,
            pitch,
            energy,
            memory,
            emotion,
        })
    }

    pub fn infer(&self, features: &Features, memory: Memory) -> Result<Inferred> {
        let mut session = self.system.session();

        session
            .input(self.pitch, features.pitch)
            .input(self.energy, features.energy)
            .input(self.memory, memory.value());

        let outputs = session.compute()?;
        let value = outputs.get(self.emotion).ok_or_else(|| FuzzyError::NoResult {
            variable: "emotion".to_owned(),
        })?;
        let inferred = Inferred {
            value,
            dominant_rule: outputs.dominant_rule(),
        };

        debug!(value = inferred.value, dominant_rule = ?inferred.dominant_rule, "inferred emotion");

        Ok(inferred)
    }
}

fn pitch_terms() -> Result<Terms<Pitch>> {
    let mut terms = Terms::new();

    terms.insert(Pitch::Low, [PITCH_MIN, PITCH_MIN, 200.])?;
    terms.insert(Pitch::Medium, [PITCH_MIN, 200., PITCH_MAX])?;
    terms.insert(Pitch::High, [200., PITCH_MAX, PITCH_MAX])?;

    Ok(terms)
}

fn memory_terms() -> Result<Terms<Level>> {
    let mut terms = Terms::new();

    terms.insert(Level::Low, [0., 0., 1.])?;
    terms.insert(Level::High, [0., 1., 1.])?;

    Ok(terms)
}

fn emotion_terms() -> Result<Terms<Emotion>> {
    let mut terms = Terms::new();

    terms.insert(Emotion::Calm, [0., 0., 5.])?;
    terms.insert(Emotion::Neutral, [0., 5., 10.])?;
    terms.insert(Emotion::Animated, [5., 10., 10.])?;

    Ok(terms)
}

//! Runs the command classifier over a sequence of recorded utterances,
//! threading the latch memory from one to the next.
//!
//! Feature extraction and speech recognition are supplied by the caller
//! through [`FeatureSource`] and [`SpeechRecognizer`]; nothing here touches
//! files or audio.

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::classifier::{Classification, Classifier};
use crate::command::Command;
use crate::error::{FuzzyError, Result};
use crate::features::Features;
use crate::latch::Memory;

/// Turns a sample into crisp features.
pub trait FeatureSource<S> {
    type Error: Display;

    fn extract(&self, sample: &S) -> std::result::Result<Features, Self::Error>;
}

/// Transcribes a sample. Used only as a side channel for reporting.
pub trait SpeechRecognizer<S> {
    fn recognize(&self, sample: &S) -> Recognition;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Recognition {
    Text(String),
    /// The recognizer heard speech but could not make out any words.
    Unrecognized,
    /// The recognizer could not be reached.
    Unavailable,
}

/// One classification step of a batch: features and the previous memory in,
/// a labelled result carrying the next memory out.
pub trait Classify {
    type Label;

    fn classify(&self, features: &Features, memory: Memory) -> Result<Classification<Self::Label>>;

    /// Memory the first sample of a batch starts from.
    fn initial_memory(&self) -> Memory {
        Memory::default()
    }
}

impl Classify for Classifier {
    type Label = Command;

    fn classify(&self, features: &Features, memory: Memory) -> Result<Classification<Command>> {
        self.classify_command(features, memory)
    }

    fn initial_memory(&self) -> Memory {
        self.config().initial_memory()
    }
}

#[derive(Debug)]
pub enum Outcome<L> {
    Classified(Classification<L>),
    /// No rule fired for the sample's features.
    NoResult(FuzzyError),
    /// Classification failed for any other reason.
    Failed(FuzzyError),
    ExtractionFailed(String),
}

impl<L> Outcome<L> {
    pub fn classification(&self) -> Option<&Classification<L>> {
        match self {
            Outcome::Classified(classification) => Some(classification),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SampleReport<L> {
    pub index: usize,
    pub features: Option<Features>,
    pub outcome: Outcome<L>,
    pub recognition: Recognition,
    /// Memory after this sample.
    pub memory: Memory,
}

#[derive(Debug)]
pub struct BatchReport<L> {
    pub samples: Vec<SampleReport<L>>,
    pub final_memory: Memory,
}

impl<L> BatchReport<L> {
    pub fn classified(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.outcome.classification().is_some())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.samples.len() - self.classified()
    }
}

pub struct BatchDriver<'c, C, F, R> {
    classifier: &'c C,
    features: F,
    recognizer: R,
}

impl<'c, C: Classify, F, R> BatchDriver<'c, C, F, R> {
    pub fn new(classifier: &'c C, features: F, recognizer: R) -> Self {
        Self {
            classifier,
            features,
            recognizer,
        }
    }

    /// Classifies every sample in order. A sample that cannot be classified
    /// is recorded and leaves the memory untouched.
    pub fn run<'a, S: 'a>(&self, samples: impl IntoIterator<Item = &'a S>) -> BatchReport<C::Label>
    where
        F: FeatureSource<S>,
        R: SpeechRecognizer<S>,
    {
        let mut memory = self.classifier.initial_memory();
        let mut reports = Vec::new();

        for (index, sample) in samples.into_iter().enumerate() {
            let (features, outcome) = match self.features.extract(sample) {
                Ok(features) => {
                    let outcome = match self.classifier.classify(&features, memory) {
                        Ok(classification) => {
                            memory = classification.memory;
                            Outcome::Classified(classification)
                        },
                        Err(err) if err.is_no_result() => {
                            warn!(index, error = %err, "no rule fired for sample");
                            Outcome::NoResult(err)
                        },
                        Err(err) => {
                            warn!(index, error = %err, "sample could not be classified");
                            Outcome::Failed(err)
                        },
                    };

                    (Some(features), outcome)
                },
                Err(err) => {
                    warn!(index, error = %err, "feature extraction failed");
                    (None, Outcome::ExtractionFailed(err.to_string()))
                },
            };
            let recognition = self.recognizer.recognize(sample);

            debug!(index, ?recognition, memory = memory.value(), "sample processed");

            reports.push(SampleReport {
                index,
                features,
                outcome,
                recognition,
                memory,
            });
        }

        let report = BatchReport {
            samples: reports,
            final_memory: memory,
        };

        info!(
            samples = report.samples.len(),
            classified = report.classified(),
            final_memory = memory.value(),
            "batch finished"
        );

        report
    }
}

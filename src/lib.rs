//! Mamdani fuzzy inference with a fuzzy set/reset latch, used to classify
//! utterances from a few crisp acoustic features while carrying a memory
//! value from one call to the next.
//!
//! ```
//! use fuzzy_latch::{Classifier, Command, Features, Memory};
//!
//! let classifier = Classifier::new()?;
//! let result = classifier.classify_command(&Features::new(2., 1., 0.), Memory::NEUTRAL)?;
//!
//! assert_eq!(result.label, Command::Yes);
//! # Ok::<(), fuzzy_latch::FuzzyError>(())
//! ```

pub mod batch;
pub mod classifier;
pub mod command;
pub mod config;
pub mod dsl;
pub mod emotion;
pub mod error;
pub mod features;
pub mod inference;
pub mod inputs;
pub mod latch;
mod linspace;
mod math;
pub mod membership;
pub mod ops;
pub mod outputs;
pub mod rules;
pub mod session;
pub mod system;
pub mod terms;
pub mod variable;

pub use crate::classifier::{Classification, Classifier};
pub use crate::command::{Command, CommandEngine};
pub use crate::config::ClassifierConfig;
pub use crate::dsl::Expr;
pub use crate::emotion::{EmotionEngine, EmotionLabel};
pub use crate::error::{ConfigError, FuzzyError, Result};
pub use crate::features::Features;
pub use crate::inference::MamdaniInference;
pub use crate::inputs::Inputs;
pub use crate::latch::{Memory, MemoryLatch};
pub use crate::membership::Triangle;
pub use crate::outputs::Outputs;
pub use crate::rules::{Rule, Rules};
pub use crate::session::Session;
pub use crate::system::ControlSystem;
pub use crate::terms::{Key, Term, Terms};
pub use crate::variable::{Variable, VariableKey, Variables};

//! A set/reset flip-flop whose state is a degree of truth instead of a bit.
//!
//! The latch is an ordinary [`ControlSystem`] over three inputs (previous
//! state `Q`, set `S` and reset `R`) and one output (next state). All rules
//! fire together and are max-aggregated; there is no priority between them:
//!
//! | rule      | premise                       | next state |
//! |-----------|-------------------------------|------------|
//! | set       | S high, R low                 | high       |
//! | reset     | S low, R high                 | low        |
//! | hold high | Q high, S low, R low          | high       |
//! | hold low  | Q low, S low, R low           | low        |
//! | arbitrate | S high, R high                | high       |
//!
//! Inputs use low `[0, 0, 1]` and high `[0, 1, 1]`, which cross at 0.5 and
//! always sum to one, so some rule fires for every input. The output sets are
//! narrow shoulders at the rails so that a held state stays close to 0 or 1.
//!
//! Holding leaks. With S and R low, a state starting at 1 reads about 0.970,
//! 0.922 and 0.853 after one, two and three updates, and about 0.636 after
//! six; a state at 0 mirrors this around 0.5. It never crosses 0.5, so the
//! latch keeps its side, but without a fresh set or reset it drifts back
//! toward the undecided middle.

use tracing::trace;

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::rules::Rules;
use crate::system::ControlSystem;
use crate::terms::{Key, Terms};
use crate::variable::{Variable, Variables};

/// Grid step of the next-state universe.
const STATE_STEP: f64 = 0.01;

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Level {
    Low,
    High,
}

/// The latch output `Q`, always within `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Memory(f64);

impl Memory {
    pub const LOW: Memory = Memory(0.);
    pub const NEUTRAL: Memory = Memory(0.5);
    pub const HIGH: Memory = Memory(1.);

    /// Clamps `value` into `[0, 1]`; NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Memory(0.)
        } else {
            Memory(value.clamp(0., 1.))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_high(self) -> bool {
        self.0 > 0.5
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::NEUTRAL
    }
}

impl From<f64> for Memory {
    fn from(value: f64) -> Self {
        Memory::new(value)
    }
}

impl From<Memory> for f64 {
    fn from(memory: Memory) -> Self {
        memory.0
    }
}

pub struct MemoryLatch {
    system: ControlSystem<Level>,
    state: Variable<Level>,
    set: Variable<Level>,
    reset: Variable<Level>,
    next_state: Variable<Level>,
}

impl MemoryLatch {
    pub fn new() -> Result<Self> {
        let mut vars = Variables::<Level>::new();
        let state = vars.add("state", 0. ..=1., STATE_STEP, signal_terms()?)?;
        let set = vars.add("set", 0. ..=1., STATE_STEP, signal_terms()?)?;
        let reset = vars.add("reset", 0. ..=1., STATE_STEP, signal_terms()?)?;
        let mut next_terms = Terms::new();

        next_terms.insert(Level::Low, [0., 0., 0.1])?;
        next_terms.insert(Level::High, [0.9, 1., 1.])?;

        let next_state = vars.add("next_state", 0. ..=1., STATE_STEP, next_terms)?;
        let mut rules = Rules::with_capacity(5);

        rules.add(set.is(Level::High).and(reset.is(Level::Low)), next_state.is(Level::High));
        rules.add(set.is(Level::Low).and(reset.is(Level::High)), next_state.is(Level::Low));
        rules.add(
            state.is(Level::High).and2(set.is(Level::Low), reset.is(Level::Low)),
            next_state.is(Level::High),
        );
        rules.add(
            state.is(Level::Low).and2(set.is(Level::Low), reset.is(Level::Low)),
            next_state.is(Level::Low),
        );
        // Simultaneous set and reset resolves to set
        rules.add(set.is(Level::High).and(reset.is(Level::High)), next_state.is(Level::High));

        let system = ControlSystem::new(vars, rules)?;

        system.check_coverage()?;

        Ok(Self {
            system,
            state,
            set,
            reset,
            next_state,
        })
    }

    /// Next latch state from the previous one and the set/reset signals, each
    /// clamped to `[0, 1]`.
    pub fn evaluate(&self, previous: Memory, set: f64, reset: f64) -> Result<Memory> {
        let inputs = Inputs::new()
            .with(self.state, previous.value())
            .with(self.set, set)
            .with(self.reset, reset);
        let outputs = self.system.run(&inputs)?;
        let next = outputs
            .get(self.next_state)
            .map(Memory::new)
            .ok_or_else(|| FuzzyError::NoResult {
                variable: "next_state".to_owned(),
            })?;

        trace!(previous = previous.value(), set, reset, next = next.value(), "latch updated");

        Ok(next)
    }
}

fn signal_terms() -> Result<Terms<Level>> {
    let mut terms = Terms::new();

    terms.insert(Level::Low, [0., 0., 1.])?;
    terms.insert(Level::High, [0., 1., 1.])?;

    Ok(terms)
}

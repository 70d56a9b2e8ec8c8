//! Rule base mapping utterance duration, energy and conversational context
//! to a spoken command on a 0 to 10 scale: yes near 0, no near 5, continue
//! near 10.

use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::features::Features;
use crate::latch::Memory;
use crate::rules::Rules;
use crate::system::ControlSystem;
use crate::terms::{Key, Terms};
use crate::variable::{Variable, Variables};

/// Upper end of every universe in this rule base.
pub const SCALE_MAX: f64 = 10.;

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Duration {
    Short,
    Medium,
    Long,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Energy {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Context {
    Neutral,
    Active,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Command {
    Yes,
    No,
    Continue,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Yes, Command::No, Command::Continue];
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandTerm {
    Duration(Duration),
    Energy(Energy),
    Context(Context),
    Command(Command),
}

impl From<Duration> for CommandTerm {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<Energy> for CommandTerm {
    fn from(e: Energy) -> Self {
        Self::Energy(e)
    }
}

impl From<Context> for CommandTerm {
    fn from(c: Context) -> Self {
        Self::Context(c)
    }
}

impl From<Command> for CommandTerm {
    fn from(c: Command) -> Self {
        Self::Command(c)
    }
}

/// Crisp result of running a rule base once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inferred {
    pub value: f64,
    /// Index of the rule with the greatest firing strength.
    pub dominant_rule: Option<usize>,
}

/// Index of the catch-all rule in the command rule base.
pub const FALLBACK_RULE: usize = 4;

pub struct CommandEngine {
    system: ControlSystem<CommandTerm>,
    duration: Variable<Duration>,
    energy: Variable<Energy>,
    context: Variable<Context>,
    command: Variable<Command>,
}

impl CommandEngine {
    pub fn new() -> Result<Self> {
        let mut vars = Variables::<CommandTerm>::new();
        let duration = vars.add("duration", 0. ..=SCALE_MAX, 1., duration_terms()?)?;
        let energy = vars.add("energy", 0. ..=SCALE_MAX, 1., energy_terms()?)?;
        let context = vars.add("context", 0. ..=SCALE_MAX, 1., context_terms()?)?;
        let command = vars.add("command", 0. ..=SCALE_MAX, 1., command_terms()?)?;
        let mut rules = Rules::with_capacity(11);

        rules.add(
            duration.is(Duration::Short).and2(energy.is(Energy::Low), context.is(Context::Neutral)),
            command.is(Command::Yes),
        );
        rules.add(
            duration.is(Duration::Short).and2(energy.is(Energy::Medium), context.is(Context::Neutral)),
            command.is(Command::No),
        );
        rules.add(
            duration.is(Duration::Medium).and2(energy.is(Energy::High), context.is(Context::Active)),
            command.is(Command::Continue),
        );
        rules.add(
            duration.is(Duration::Long).and2(energy.is(Energy::High), context.is(Context::Active)),
            command.is(Command::Continue),
        );
        // Catch-all: some input lies outside every set of its variable
        rules.add(
            vars.outside(duration)?.or(vars.outside(energy)?).or(vars.outside(context)?),
            command.is(Command::Yes),
        );

        // Combinations the rules above leave uncovered
        rules.add(energy.is(Energy::Low).and(context.is(Context::Active)), command.is(Command::No));
        rules.add(
            energy.is(Energy::Medium).and(context.is(Context::Active)),
            command.is(Command::Continue),
        );
        rules.add(energy.is(Energy::High).and(context.is(Context::Neutral)), command.is(Command::No));
        rules.add(
            duration
                .is(Duration::Medium)
                .or(duration.is(Duration::Long))
                .and2(energy.is(Energy::Low), context.is(Context::Neutral)),
            command.is(Command::Yes),
        );
        rules.add(
            duration
                .is(Duration::Medium)
                .or(duration.is(Duration::Long))
                .and2(energy.is(Energy::Medium), context.is(Context::Neutral)),
            command.is(Command::No),
        );
        rules.add(
            duration.is(Duration::Short).and2(energy.is(Energy::High), context.is(Context::Active)),
            command.is(Command::Continue),
        );

        let system = ControlSystem::new(vars, rules)?;

        system.check_coverage()?;

        Ok(Self {
            system,
            duration,
            energy,
            context,
            command,
        })
    }

    /// Runs the rule base with `memory` as the conversational context.
    pub fn infer(&self, features: &Features, memory: Memory) -> Result<Inferred> {
        let mut session = self.system.session();

        session
            .input(self.duration, features.duration)
            .input(self.energy, features.energy)
            .input(self.context, memory.value() * SCALE_MAX);

        let outputs = session.compute()?;
        let value = outputs.get(self.command).ok_or_else(|| FuzzyError::NoResult {
            variable: "command".to_owned(),
        })?;
        let inferred = Inferred {
            value,
            dominant_rule: outputs.dominant_rule(),
        };

        debug!(value = inferred.value, dominant_rule = ?inferred.dominant_rule, "inferred command");

        Ok(inferred)
    }

    /// The command whose set `value` belongs to most; earlier commands win ties.
    pub fn label(&self, value: f64) -> Result<Command> {
        let var = self.system.variables().get(self.command.key())?;
        let mut best = (Command::Yes, f64::NEG_INFINITY);

        for command in Command::ALL {
            let membership = var.membership(&command.into(), value)?;

            if membership > best.1 {
                best = (command, membership);
            }
        }

        Ok(best.0)
    }
}

fn duration_terms() -> Result<Terms<Duration>> {
    let mut terms = Terms::new();

    terms.insert(Duration::Short, [0., 0., 5.])?;
    terms.insert(Duration::Medium, [0., 5., 10.])?;
    terms.insert(Duration::Long, [5., 10., 10.])?;

    Ok(terms)
}

pub(crate) fn energy_terms() -> Result<Terms<Energy>> {
    let mut terms = Terms::new();

    terms.insert(Energy::Low, [0., 0., 5.])?;
    terms.insert(Energy::Medium, [0., 5., 10.])?;
    terms.insert(Energy::High, [5., 10., 10.])?;

    Ok(terms)
}

fn context_terms() -> Result<Terms<Context>> {
    let mut terms = Terms::new();

    terms.insert(Context::Neutral, [0., 0., 5.])?;
    terms.insert(Context::Active, [5., 10., 10.])?;

    Ok(terms)
}

fn command_terms() -> Result<Terms<Command>> {
    let mut terms = Terms::new();

    terms.insert(Command::Yes, [0., 0., 5.])?;
    terms.insert(Command::No, [0., 5., 10.])?;
    terms.insert(Command::Continue, [5., 10., 10.])?;

    Ok(terms)
}

use std::fmt::Debug;

use crate::error::Result;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::system::ControlSystem;
use crate::variable::Variable;

/// Per-call state for running a [`ControlSystem`]: the crisp inputs that were
/// set and the outputs of the last successful computation. Create one per
/// classification call, or [`reset`](Session::reset) it between calls.
pub struct Session<'s, T> {
    system: &'s ControlSystem<T>,
    inputs: Inputs,
    outputs: Option<Outputs>,
}

impl<'s, T: Copy + PartialEq + Debug> Session<'s, T> {
    pub(crate) fn new(system: &'s ControlSystem<T>) -> Self {
        Self {
            system,
            inputs: Inputs::new(),
            outputs: None,
        }
    }

    pub fn input<I>(&mut self, var: Variable<I>, value: f64) -> &mut Self {
        self.inputs.add(var, value);
        self.outputs = None;
        self
    }

    pub fn compute(&mut self) -> Result<&Outputs> {
        self.outputs = None;

        let outputs = self.system.run(&self.inputs)?;

        Ok(self.outputs.insert(outputs))
    }

    pub fn output<I>(&self, var: Variable<I>) -> Option<f64> {
        self.outputs.as_ref().and_then(|outputs| outputs.get(var))
    }

    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    pub fn reset(&mut self) {
        self.inputs.clear();
        self.outputs = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzyError;
    use crate::rules::Rules;
    use crate::terms::{Key, Terms};
    use crate::variable::Variables;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Level {
        Low,
        High,
    }

    fn system() -> (ControlSystem<Level>, Variable<Level>, Variable<Level>) {
        let mut vars = Variables::new();
        let mut terms = Terms::new();

        terms.insert(Level::Low, [0., 0., 1.]).unwrap();
        terms.insert(Level::High, [0., 1., 1.]).unwrap();

        let x = vars.add("x", 0. ..=1., 0.1, terms).unwrap();
        let mut terms = Terms::new();

        terms.insert(Level::Low, [0., 0., 1.]).unwrap();
        terms.insert(Level::High, [0., 1., 1.]).unwrap();

        let y = vars.add("y", 0. ..=1., 0.1, terms).unwrap();
        let mut rules = Rules::new();

        rules.add(x.is(Level::Low), y.is(Level::High));
        rules.add(x.is(Level::High), y.is(Level::Low));

        (ControlSystem::new(vars, rules).unwrap(), x, y)
    }

    #[test]
    fn test_compute_and_reset() {
        let (system, x, y) = system();
        let mut session = system.session();

        session.input(x, 0.);
        session.compute().unwrap();

        let high = session.output(y).unwrap();

        assert!(high > 0.5);

        session.reset();

        assert_eq!(session.output(y), None);
        assert!(matches!(session.compute().unwrap_err(), FuzzyError::MissingInput { .. }));
    }

    #[test]
    fn test_sessions_are_independent() {
        let (system, x, y) = system();
        let mut first = system.session();
        let mut second = system.session();

        first.input(x, 0.).compute().unwrap();
        second.input(x, 1.).compute().unwrap();

        assert!(first.output(y).unwrap() > 0.5);
        assert!(second.output(y).unwrap() < 0.5);
    }

    #[test]
    fn test_new_input_invalidates_outputs() {
        let (system, x, y) = system();
        let mut session = system.session();

        session.input(x, 0.3).compute().unwrap();
        assert!(session.output(y).is_some());

        session.input(x, 0.7);
        assert_eq!(session.output(y), None);
    }
}

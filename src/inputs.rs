use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for the input variables of one inference call.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn with<I>(mut self, var: Variable<I>, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

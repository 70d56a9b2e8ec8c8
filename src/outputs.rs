use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    defuzzified: HashMap<VariableKey, f64>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(defuzzified: HashMap<VariableKey, f64>, firing_strengths: Vec<f64>) -> Self {
        Self {
            defuzzified,
            firing_strengths,
        }
    }

    /// The crisp value inferred for `var`, if any rule targets it.
    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.defuzzified.get(&var.0).copied()
    }

    /// Firing strength of each rule, in rule order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    /// Index of the rule that fired hardest; the first one wins ties.
    pub fn dominant_rule(&self) -> Option<usize> {
        self.firing_strengths
            .iter()
            .enumerate()
            .filter(|(_, s)| **s > 0.)
            .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
                Some((_, best_s)) if best_s >= s => best,
                _ => Some((i, s)),
            })
            .map(|(i, _)| i)
    }
}

#[test]
fn test_dominant_rule() {
    let outputs = Outputs::new(HashMap::new(), vec![0.2, 0.7, 0.7, 0.]);

    assert_eq!(outputs.dominant_rule(), Some(1));
    assert_eq!(Outputs::new(HashMap::new(), vec![0., 0.]).dominant_rule(), None);
}

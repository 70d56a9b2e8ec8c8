use std::collections::HashMap;
use std::fmt::Debug;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::session::Session;
use crate::variable::{VariableKey, Variables};

/// A validated set of variables and rules plus the inference method to run
/// them with. Immutable once built, so it can be shared between threads and
/// used by any number of [`Session`]s.
pub struct ControlSystem<T> {
    vars: Variables<T>,
    rules: Rules<T>,
    inference: MamdaniInference,
}

impl<T: Copy + PartialEq + Debug> ControlSystem<T> {
    /// Checks that every rule is well formed and only refers to variables and
    /// sets that exist.
    pub fn new(vars: Variables<T>, rules: Rules<T>) -> Result<Self> {
        let mut has_consequent = false;

        for rule in rules.iter() {
            rule.premise().check_shape()?;

            if !(0. ..=1.).contains(&rule.weight()) {
                return Err(ConfigError::InvalidWeight(rule.weight()).into());
            }

            let conclusions = rule.conclusions()?;

            has_consequent |= !conclusions.is_empty();

            for (var_key, term) in rule.premise().propositions().into_iter().chain(conclusions) {
                vars.get(var_key)?.set(term)?;
            }
        }

        if !has_consequent {
            return Err(ConfigError::MissingConsequent.into());
        }

        Ok(Self {
            vars,
            rules,
            inference: MamdaniInference::default(),
        })
    }

    pub fn with_inference(self, inference: MamdaniInference) -> Self {
        Self { inference, ..self }
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.vars
    }

    pub fn session(&self) -> Session<'_, T> {
        Session::new(self)
    }

    pub fn run(&self, inputs: &Inputs) -> Result<Outputs> {
        self.inference.eval(&self.vars, &self.rules, inputs)
    }

    /// Probes every output variable with combinations of characteristic input
    /// values (see `VariableConstraints::probe_points`) and fails on the first
    /// combination where no rule targeting that output fires.
    pub fn check_coverage(&self) -> Result<()> {
        for consequent in self.consequents() {
            let rules: Vec<_> = self.rules.iter().filter(|rule| rule.targets(consequent)).collect();
            let mut antecedents: Vec<VariableKey> = Vec::new();

            for rule in &rules {
                for (key, _) in rule.premise().propositions() {
                    if !antecedents.contains(&key) {
                        antecedents.push(key);
                    }
                }
            }

            let probes = antecedents
                .iter()
                .map(|key| Ok(self.vars.get(*key)?.probe_points()))
                .collect::<Result<Vec<_>>>()?;
            let mut odometer = vec![0usize; antecedents.len()];
            let mut checked = 0usize;

            loop {
                let facts: HashMap<_, _> = antecedents
                    .iter()
                    .zip(&probes)
                    .zip(&odometer)
                    .map(|((key, points), &i)| (*key, points[i]))
                    .collect();
                let mut covered = false;

                for rule in &rules {
                    let strength = rule
                        .premise()
                        .strength_with(&self.vars, &facts, self.inference.and_op(), self.inference.or_op())?;

                    if strength * rule.weight() > 0. {
                        covered = true;
                        break;
                    }
                }

                if !covered {
                    let probe = antecedents
                        .iter()
                        .map(|key| format!("{}={}", self.vars.name_of(*key), facts[key]))
                        .collect::<Vec<_>>()
                        .join(", ");

                    return Err(ConfigError::Uncovered {
                        variable: self.vars.name_of(consequent).to_owned(),
                        probe,
                    }
                    .into());
                }

                checked += 1;

                if !advance(&mut odometer, &probes) {
                    break;
                }
            }

            debug!(variable = self.vars.name_of(consequent), checked, "rule coverage verified");
        }

        Ok(())
    }

    /// Output variables in order of first appearance in the rules.
    fn consequents(&self) -> Vec<VariableKey> {
        let mut keys = Vec::new();

        for rule in self.rules.iter() {
            for (key, _) in rule.conclusions().unwrap_or_default() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }

        keys
    }
}

/// Steps to the next probe combination; false once every combination was seen.
fn advance(odometer: &mut [usize], probes: &[Vec<f64>]) -> bool {
    for (digit, points) in odometer.iter_mut().zip(probes) {
        *digit += 1;

        if *digit < points.len() {
            return true;
        }

        *digit = 0;
    }

    false
}

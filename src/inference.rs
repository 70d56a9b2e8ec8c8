use std::collections::HashMap;
use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{VariableKey, Variables};

/// Mamdani style inference: fuzzify, fire, imply, aggregate, defuzzify.
///
/// The default operators are min for AND, max for OR, min (clipping) for
/// implication, max for aggregation and the centroid for defuzzification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    prod_link: ProductionLink,
    defuzz_op: DefuzzificationOp,
}

impl MamdaniInference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
        }
    }

    pub fn with_defuzzification(self, defuzz_op: DefuzzificationOp) -> Self {
        Self { defuzz_op, ..self }
    }

    pub fn and_op(&self) -> AndOp {
        self.and_op
    }

    pub fn or_op(&self) -> OrOp {
        self.or_op
    }

    pub fn eval<T: Copy + PartialEq + Debug>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        inputs: &Inputs,
    ) -> Result<Outputs> {
        // Fuzzificate facts: out of range values are clamped, never rejected
        let mut facts = HashMap::with_capacity(inputs.0.len());

        for (key, value) in &inputs.0 {
            let var = vars.get(*key)?;
            let clamped = var.clamp(*value);

            if clamped != *value {
                trace!(variable = var.name(), value, clamped, "clamped input to universe");
            }

            facts.insert(*key, clamped);
        }

        // Compute rule firing strengths
        let mut firing_strengths = Vec::with_capacity(rules.len());

        for (i, rule) in rules.0.iter().enumerate() {
            let strength = rule.premise.strength_with(vars, &facts, self.and_op, self.or_op)? * rule.weight;

            trace!(rule = i, strength, "fired rule");
            firing_strengths.push(strength);
        }

        // Imply and aggregate, keeping consequents in order of first appearance
        let mut aggregated: Vec<(VariableKey, Vec<f64>)> = Vec::new();

        for (rule, &strength) in rules.0.iter().zip(&firing_strengths) {
            for (var_key, term) in rule.conclusions()? {
                let var = vars.get(var_key)?;
                let set = var.set(term)?;
                let index = match aggregated.iter().position(|(key, _)| *key == var_key) {
                    Some(index) => index,
                    None => {
                        aggregated.push((var_key, vec![0.; var.universe().len()]));
                        aggregated.len() - 1
                    },
                };
                let implied = var.universe().iter().map(|&y| self.imp_op.call(strength, set.evaluate(y)));

                self.prod_link.fold_into(&mut aggregated[index].1, implied);
            }
        }

        // Defuzzificate
        let mut defuzzified = HashMap::with_capacity(aggregated.len());

        for (var_key, membership) in aggregated {
            let var = vars.get(var_key)?;
            let crisp = self
                .defuzz_op
                .call(var.universe(), &membership)
                .ok_or_else(|| FuzzyError::NoResult {
                    variable: var.name().to_owned(),
                })?;

            debug!(variable = var.name(), crisp, "defuzzified output");
            defuzzified.insert(var_key, var.clamp(crisp));
        }

        Ok(Outputs::new(defuzzified, firing_strengths))
    }
}

use crate::dsl::Expr;
use crate::error::{ConfigError, FuzzyError, Result};
use crate::variable::VariableKey;

pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// `consequence` is a single `var.is(term)` or several joined with `and`.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.add_weighted(premise, consequence, 1.);
    }

    /// Like [`Rules::add`], scaling the firing strength by `weight` in `[0, 1]`.
    pub fn add_weighted(&mut self, premise: Expr<T>, consequence: Expr<T>, weight: f64) {
        self.0.push(Rule {
            premise,
            consequence,
            weight,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }
}

pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
    pub(crate) weight: f64,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The `(variable, term)` targets of this rule.
    pub fn conclusions(&self) -> Result<Vec<(VariableKey, &T)>> {
        match &self.consequence {
            Expr::Is(var_key, term) => Ok(vec![(*var_key, term)]),
            Expr::And(exprs) if !exprs.is_empty() => exprs
                .iter()
                .map(|expr| match expr {
                    Expr::Is(var_key, term) => Ok((*var_key, term)),
                    _ => Err(FuzzyError::from(ConfigError::InvalidConsequence)),
                })
                .collect(),
            _ => Err(ConfigError::InvalidConsequence.into()),
        }
    }

    pub(crate) fn targets(&self, var_key: VariableKey) -> bool {
        self.consequence.propositions().iter().any(|(key, _)| *key == var_key)
    }
}

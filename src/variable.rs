use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::dsl::Expr;
use crate::error::{ConfigError, Result};
use crate::linspace::Linspace;
use crate::membership::Triangle;
use crate::terms::{Term, Terms};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable whose fuzzy sets are the variants of `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Debug for Variable<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

/// All the variables of a system. `T` is the system-wide term type that each
/// variable's own term enum converts into.
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, VariableConstraints<T>>);

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self(SlotMap::with_key())
    }
}

impl<T: Copy + PartialEq + Debug> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a variable over `universe_range`, discretized every `step`.
    pub fn add<I: Into<T> + Term>(
        &mut self,
        name: &str,
        universe_range: RangeInclusive<f64>,
        step: f64,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        let terms = terms.0.iter().map(|(term, tri)| (term.into(), *tri)).collect();
        let constraints = VariableConstraints::new(name, universe_range, step, terms)?;
        let key = self.0.insert(constraints);

        Ok(Variable(key, PhantomData))
    }

    pub fn get(&self, key: VariableKey) -> Result<&VariableConstraints<T>> {
        self.0.get(key).ok_or_else(|| ConfigError::UnknownVariable.into())
    }

    pub(crate) fn name_of(&self, key: VariableKey) -> &str {
        self.0.get(key).map_or("<unknown>", |var| var.name())
    }

    /// Expression that is true to the degree `var` lies outside every one of
    /// its fuzzy sets: `NOT (set_1 OR set_2 OR ...)`.
    pub fn outside<I>(&self, var: Variable<I>) -> Result<Expr<T>> {
        let constraints = self.get(var.0)?;

        if constraints.terms.is_empty() {
            return Err(ConfigError::EmptyExpression.into());
        }

        let union = constraints
            .terms
            .iter()
            .map(|(term, _)| Expr::Is(var.0, *term))
            .collect();

        Ok(Expr::Not(Box::new(Expr::Or(union))))
    }
}

pub struct VariableConstraints<T> {
    name: String,
    universe: Vec<f64>,
    min_u: f64,
    max_u: f64,
    terms: Vec<(T, Triangle)>,
}

impl<T: Copy + PartialEq + Debug> VariableConstraints<T> {
    fn new(name: &str, universe_range: RangeInclusive<f64>, step: f64, terms: Vec<(T, Triangle)>) -> Result<Self> {
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();
        let valid = min_u.is_finite() && max_u.is_finite() && min_u < max_u && step.is_finite() && step > 0.;

        if !valid {
            return Err(ConfigError::InvalidUniverse {
                variable: name.to_owned(),
                min: min_u,
                max: max_u,
                step,
            }
            .into());
        }

        let num = Linspace::points_for_step(min_u, max_u, step);
        let universe = Linspace::new(min_u, max_u, num).collect();

        Ok(Self {
            name: name.to_owned(),
            universe,
            min_u,
            max_u,
            terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The discretized domain used for aggregation and defuzzification.
    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    pub fn set(&self, term: &T) -> Result<&Triangle> {
        self.terms
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, tri)| tri)
            .ok_or_else(|| {
                ConfigError::UndefinedSet {
                    variable: self.name.clone(),
                    term: format!("{term:?}"),
                }
                .into()
            })
    }

    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() {
            self.min_u
        } else {
            x.clamp(self.min_u, self.max_u)
        }
    }

    pub fn membership(&self, term: &T, x: f64) -> Result<f64> {
        Ok(self.set(term)?.evaluate(x))
    }

    /// Crisp values worth checking for rule coverage: the universe ends, every
    /// set's control points and the midpoints between neighbouring ones.
    pub(crate) fn probe_points(&self) -> Vec<f64> {
        let mut points = vec![self.min_u, self.max_u];

        points.extend(self.terms.iter().flat_map(|(_, tri)| tri.points()).map(|p| self.clamp(p)));
        points.sort_unstable_by(f64::total_cmp);
        points.dedup();

        let midpoints: Vec<_> = points.windows(2).map(|w| (w[0] + w[1]) / 2.).collect();

        points.extend(midpoints);
        points.sort_unstable_by(f64::total_cmp);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Level {
        Low,
        High,
    }

    fn level_terms() -> Terms<Level> {
        let mut terms = Terms::new();

        terms.insert(Level::Low, [0., 0., 10.]).unwrap();
        terms.insert(Level::High, [0., 10., 10.]).unwrap();
        terms
    }

    #[test]
    fn test_universe() {
        let mut vars = Variables::<Level>::new();
        let level = vars.add("level", 0. ..=10., 1., level_terms()).unwrap();
        let var = vars.get(level.key()).unwrap();

        assert_eq!(var.universe().len(), 11);
        assert_eq!(var.universe()[0], 0.);
        assert_eq!(var.universe()[10], 10.);
        assert_eq!(var.name(), "level");
    }

    #[test]
    fn test_membership_and_clamp() {
        let mut vars = Variables::<Level>::new();
        let level = vars.add("level", 0. ..=10., 1., level_terms()).unwrap();
        let var = vars.get(level.key()).unwrap();

        assert_eq!(var.membership(&Level::High, 7.5).unwrap(), 0.75);
        assert_eq!(var.clamp(-4.), 0.);
        assert_eq!(var.clamp(12.), 10.);
        assert_eq!(var.clamp(f64::NAN), 0.);
    }

    #[test]
    fn test_undefined_set() {
        let mut terms = Terms::new();

        terms.insert(Level::Low, [0., 0., 10.]).unwrap();

        let mut vars = Variables::<Level>::new();
        let level = vars.add("level", 0. ..=10., 1., terms).unwrap();
        let err = vars.get(level.key()).unwrap().membership(&Level::High, 1.).unwrap_err();

        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "configuration error: variable `level` has no fuzzy set `High`"
        );
    }

    #[test]
    fn test_invalid_universe() {
        let mut vars = Variables::<Level>::new();

        assert!(vars.add("level", 10. ..=0., 1., level_terms()).is_err());
        assert!(vars.add("level", 0. ..=10., 0., level_terms()).is_err());
    }

    #[test]
    fn test_probe_points() {
        let mut vars = Variables::<Level>::new();
        let level = vars.add("level", 0. ..=10., 1., level_terms()).unwrap();

        assert_eq!(vars.get(level.key()).unwrap().probe_points(), vec![0., 5., 10.]);
    }
}

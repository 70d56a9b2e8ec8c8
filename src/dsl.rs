use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::Not;

use crate::error::{ConfigError, FuzzyError, Result};
use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey, Variables};

/// Rule premise: a boolean combination of `variable is term` propositions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
    Not(Box<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// Checks every node is well formed: no empty And/Or.
    pub(crate) fn check_shape(&self) -> Result<()> {
        match self {
            Expr::Is(..) => Ok(()),
            Expr::And(exprs) | Expr::Or(exprs) if exprs.is_empty() => Err(ConfigError::EmptyExpression.into()),
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().try_for_each(Expr::check_shape),
            Expr::Not(expr) => expr.check_shape(),
        }
    }
}

impl<T> Not for Expr<T> {
    type Output = Self;

    fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }
}

impl<T: Copy + PartialEq + Debug> Expr<T> {
    /// Firing strength with min/max connectives. `facts` must already be
    /// clamped to each variable's universe.
    pub fn strength(&self, vars: &Variables<T>, facts: &HashMap<VariableKey, f64>) -> Result<f64> {
        self.strength_with(vars, facts, AndOp::Min, OrOp::Max)
    }

    pub fn strength_with(
        &self,
        vars: &Variables<T>,
        facts: &HashMap<VariableKey, f64>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> Result<f64> {
        match self {
            Expr::Is(var_key, term) => {
                let var = vars.get(*var_key)?;
                let fact = facts.get(var_key).ok_or_else(|| FuzzyError::MissingInput {
                    variable: var.name().to_owned(),
                })?;

                var.membership(term, *fact)
            },
            Expr::And(exprs) => {
                let mut strengths = exprs.iter().map(|e| e.strength_with(vars, facts, and_op, or_op));
                let first = strengths.next().ok_or(ConfigError::EmptyExpression)??;

                strengths.try_fold(first, |acc, s: Result<f64>| -> Result<f64> { Ok(and_op.call(acc, s?)) })
            },
            Expr::Or(exprs) => {
                let mut strengths = exprs.iter().map(|e| e.strength_with(vars, facts, and_op, or_op));
                let first = strengths.next().ok_or(ConfigError::EmptyExpression)??;

                strengths.try_fold(first, |acc, s: Result<f64>| -> Result<f64> { Ok(or_op.call(acc, s?)) })
            },
            Expr::Not(expr) => Ok(1. - expr.strength_with(vars, facts, and_op, or_op)?),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

use num::Float;

use crate::math::weighted_mean;

/// And operator used to combine propositions in a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
        }
    }
}

/// Or operator used to combine propositions in a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
        }
    }
}

/// How a rule's firing strength shapes its consequent set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImplicationOp {
    /// Mamdani: clip the set at the firing strength
    #[default]
    Min,
    /// Larsen: scale the set by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductionLink {
    #[default]
    Max,
    BoundedSum,
    ProbOr,
}

impl ProductionLink {
    /// Folds `v` into the running aggregate `u`, pointwise.
    pub fn fold_into<F: Float>(self, u: &mut [F], v: impl IntoIterator<Item = F>) {
        for (u, v) in u.iter_mut().zip(v) {
            *u = match self {
                Self::Max => F::max(*u, v),
                Self::BoundedSum => F::min(F::one(), *u + v),
                Self::ProbOr => *u + v - *u * v,
            };
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefuzzificationOp {
    /// Center of Gravity
    #[default]
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Returns `None` when the membership is zero everywhere.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        let total = membership.iter().fold(F::zero(), |acc, &mu| acc + mu);

        if total == F::zero() {
            return None;
        }

        let maximum = membership.iter().copied().fold(F::zero(), F::max);
        let at_maximum = || {
            universe
                .iter()
                .copied()
                .zip(membership.iter().copied())
                .filter_map(move |(u, m)| (m == maximum).then_some(u))
        };

        match self {
            Self::Cog => weighted_mean(universe, membership),
            Self::Boa => {
                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let half = areas.iter().fold(F::zero(), |acc, &area| acc + area) / two;

                if half == F::zero() {
                    // A single spike carries no area
                    return at_maximum().next();
                }

                let mut cum_area = F::zero();

                for (i, &area) in areas.iter().enumerate() {
                    if cum_area + area >= half {
                        let (m0, m1) = (membership[i], membership[i + 1]);
                        let h = universe[i + 1] - universe[i];
                        let rest = half - cum_area;
                        // Area from the segment start to t is m0*t + (m1 - m0)*t^2/(2h)
                        let disc = (m0 * m0 + two * (m1 - m0) * rest / h).max(F::zero());
                        let t = two * rest / (m0 + disc.sqrt());

                        return Some(universe[i] + t.max(F::zero()).min(h));
                    }

                    cum_area = cum_area + area;
                }

                universe.last().copied()
            },
            Self::Mom => {
                let (len, sum) = at_maximum().fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                Some(sum / len)
            },
            Self::Lom => at_maximum().reduce(F::max),
            Self::Som => at_maximum().reduce(F::min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSE: [f64; 5] = [0., 1., 2., 3., 4.];

    #[test]
    fn test_connectives() {
        assert_eq!(AndOp::Min.call(0.3, 0.6), 0.3);
        assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
        assert_eq!(OrOp::Max.call(0.3, 0.6), 0.6);
        assert_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
        assert_eq!(ImplicationOp::Min.call(0.4, 0.9), 0.4);
        assert_eq!(ImplicationOp::Prod.call(0.5, 0.5), 0.25);
    }

    #[test]
    fn test_production_link() {
        let mut agg = vec![0., 0.5, 1.];

        ProductionLink::Max.fold_into(&mut agg, [0.2, 0.2, 0.2]);
        assert_eq!(agg, vec![0.2, 0.5, 1.]);

        ProductionLink::BoundedSum.fold_into(&mut agg, [0.5, 0.5, 0.5]);
        assert_eq!(agg, vec![0.7, 1., 1.]);
    }

    #[test]
    fn test_symmetric_shape_centres() {
        let membership = [0., 0.5, 1., 0.5, 0.];

        for op in [
            DefuzzificationOp::Cog,
            DefuzzificationOp::Boa,
            DefuzzificationOp::Mom,
            DefuzzificationOp::Lom,
            DefuzzificationOp::Som,
        ] {
            assert_eq!(op.call(&UNIVERSE, &membership), Some(2.), "{op:?}");
        }
    }

    #[test]
    fn test_plateau() {
        let membership = [0., 1., 1., 1., 0.];

        assert_eq!(DefuzzificationOp::Mom.call(&UNIVERSE, &membership), Some(2.));
        assert_eq!(DefuzzificationOp::Som.call(&UNIVERSE, &membership), Some(1.));
        assert_eq!(DefuzzificationOp::Lom.call(&UNIVERSE, &membership), Some(3.));
    }

    #[test]
    fn test_empty_membership() {
        let membership = [0.; 5];

        assert_eq!(DefuzzificationOp::Cog.call(&UNIVERSE, &membership), None);
        assert_eq!(DefuzzificationOp::Boa.call(&UNIVERSE, &membership), None);
        assert_eq!(DefuzzificationOp::Mom.call(&UNIVERSE, &membership), None);
    }

    #[test]
    fn test_spike_bisector() {
        let membership = [0., 0., 0., 0., 1.];
        let boa = DefuzzificationOp::Boa.call(&UNIVERSE, &membership).unwrap();

        // The last segment is a ramp, so the half-area point is 1/sqrt(2) into it
        assert!((boa - (3. + 0.5f64.sqrt())).abs() < 1e-12, "{boa}");
    }

    #[test]
    fn test_bisector_splits_area() {
        let membership = [0.2, 0.9, 0.4, 1., 0.6];
        let boa = DefuzzificationOp::Boa.call(&UNIVERSE, &membership).unwrap();
        let area_left_of = |x: f64| {
            // Trapezoids up to x, with the membership interpolated linearly inside a segment
            let mut area = 0.;

            for i in 0..4 {
                let (u0, u1) = (UNIVERSE[i], UNIVERSE[i + 1]);
                let end = x.min(u1);

                if end <= u0 {
                    break;
                }

                let m_end = membership[i] + (membership[i + 1] - membership[i]) * (end - u0) / (u1 - u0);

                area += (membership[i] + m_end) * (end - u0) / 2.;
            }

            area
        };

        assert!((area_left_of(boa) - area_left_of(4.) / 2.).abs() < 1e-12, "{boa}");
    }

    #[test]
    fn test_flat_bisector() {
        let membership = [1., 1., 1., 1., 1.];

        assert_eq!(DefuzzificationOp::Boa.call(&UNIVERSE, &membership), Some(2.));
    }
}

use num::Float;

/// Sum of `y * mu` over `sum of mu`, or `None` when the weights sum to zero.
pub(crate) fn weighted_mean<F: Float>(universe: &[F], membership: &[F]) -> Option<F> {
    let (num, den) = universe
        .iter()
        .zip(membership)
        .fold((F::zero(), F::zero()), |(num, den), (&y, &mu)| (num + y * mu, den + mu));

    if den == F::zero() {
        None
    } else {
        Some(num / den)
    }
}

#[test]
fn test_weighted_mean() {
    assert_eq!(weighted_mean(&[0., 1., 2.], &[0., 1., 0.]), Some(1.));
    assert_eq!(weighted_mean(&[0., 1., 2.], &[1., 0., 1.]), Some(1.));
    assert_eq!(weighted_mean(&[0., 1., 2.], &[0., 0., 0.]), None);
}

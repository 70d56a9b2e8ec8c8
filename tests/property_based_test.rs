use fuzzy_latch::{Classifier, Features, Memory, MemoryLatch, Triangle};
use proptest::prelude::*;

fn triangle() -> impl Strategy<Value = Triangle> {
    (-100.0..100.0, 0.0..50.0, 0.0..50.0).prop_map(|(a, ab, bc): (f64, f64, f64)| {
        Triangle::new(a, a + ab, a + ab + bc).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_membership_is_bounded(t in triangle(), x in -500.0..500.0) {
        let mu = t.evaluate(x);

        prop_assert!((0. ..=1.).contains(&mu), "{}", mu);
    }

    #[test]
    fn prop_membership_at_control_points(t in triangle()) {
        let [a, b, c] = t.points();

        prop_assert_eq!(t.evaluate(b), 1.);

        if a < b {
            prop_assert_eq!(t.evaluate(a), 0.);
        }
        if b < c {
            prop_assert_eq!(t.evaluate(c), 0.);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 50,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_command_output_in_domain(
        duration in -5.0..15.0,
        energy in -5.0..15.0,
        memory in 0.0..=1.0,
    ) {
        let classifier = Classifier::new().unwrap();
        let result = classifier
            .classify_command(&Features::new(duration, energy, 0.), Memory::new(memory))
            .unwrap();

        prop_assert!(!result.value.is_nan());
        prop_assert!((0. ..=10.).contains(&result.value), "{}", result.value);
        prop_assert!((0. ..=1.).contains(&result.memory.value()));
    }

    #[test]
    fn prop_emotion_output_in_domain(
        energy in -5.0..15.0,
        pitch in 0.0..500.0,
        memory in 0.0..=1.0,
    ) {
        let classifier = Classifier::new().unwrap();
        let result = classifier
            .classify_emotion(&Features::new(0., energy, pitch), Memory::new(memory))
            .unwrap();

        prop_assert!((0. ..=10.).contains(&result.value), "{}", result.value);
    }

    #[test]
    fn prop_latch_set_and_reset(q in 0.0..=1.0) {
        let latch = MemoryLatch::new().unwrap();

        prop_assert!(latch.evaluate(Memory::new(q), 1., 0.).unwrap().value() > 0.5);
        prop_assert!(latch.evaluate(Memory::new(q), 0., 1.).unwrap().value() < 0.5);
        prop_assert!(latch.evaluate(Memory::new(q), 1., 1.).unwrap().value() > 0.5);
    }

    #[test]
    fn prop_classification_is_deterministic(
        duration in 0.0..10.0,
        energy in 0.0..10.0,
        pitch in 50.0..350.0,
        memory in 0.0..=1.0,
    ) {
        let classifier = Classifier::new().unwrap();
        let features = Features::new(duration, energy, pitch);
        let memory = Memory::new(memory);

        prop_assert_eq!(
            classifier.classify_command(&features, memory).unwrap(),
            classifier.classify_command(&features, memory).unwrap()
        );
        prop_assert_eq!(
            classifier.classify_emotion(&features, memory).unwrap(),
            classifier.classify_emotion(&features, memory).unwrap()
        );
    }
}

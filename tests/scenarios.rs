use fuzzy_latch::command::FALLBACK_RULE;
use fuzzy_latch::emotion::PITCH_MAX;
use fuzzy_latch::{
    Classifier, Command, CommandEngine, ControlSystem, EmotionEngine, EmotionLabel, Features, FuzzyError, Inputs, Key,
    Memory, MemoryLatch, Rules, Terms, Variables,
};

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
enum Level {
    Low,
    High,
}

#[test]
fn test_short_quiet_utterance_lands_in_lower_third() {
    let engine = CommandEngine::new().unwrap();
    let inferred = engine.infer(&Features::new(2., 1., 0.), Memory::NEUTRAL).unwrap();

    // Context 5 sits outside both context sets, so the catch-all carries it
    assert_eq!(inferred.dominant_rule, Some(FALLBACK_RULE));
    assert!(inferred.value < 10. / 3.);
    assert_eq!(engine.label(inferred.value).unwrap(), Command::Yes);
}

#[test]
fn test_high_pitch_loud_utterance_is_animated() {
    let engine = EmotionEngine::new().unwrap();
    let inferred = engine.infer(&Features::new(0., 8., 300.), Memory::new(0.9)).unwrap();

    assert_eq!(inferred.dominant_rule, Some(0));
    assert!(inferred.value > 5.);
    assert_eq!(EmotionLabel::from_intensity(inferred.value, 5.), EmotionLabel::Animated);
}

#[test]
fn test_simultaneous_set_and_reset_is_stable() {
    let latch = MemoryLatch::new().unwrap();
    let first = latch.evaluate(Memory::NEUTRAL, 1., 1.).unwrap();
    let second = latch.evaluate(first, 1., 1.).unwrap();

    assert!(first.value() > 0.9);
    assert!(second.value() > 0.9);
    assert_eq!(first, second);
}

#[test]
fn test_identical_calls_are_bit_identical() {
    let classifier = Classifier::new().unwrap();
    let features = Features::new(3.7, 6.2, 241.);
    let memory = Memory::new(0.42);

    for _ in 0..5 {
        let a = classifier.classify_emotion(&features, memory).unwrap();
        let b = classifier.classify_emotion(&features, memory).unwrap();

        assert_eq!(a.value.to_bits(), b.value.to_bits());
        assert_eq!(a.memory.value().to_bits(), b.memory.value().to_bits());
    }
}

#[test]
fn test_out_of_range_inputs_still_classify() {
    let classifier = Classifier::new().unwrap();
    let command = classifier
        .classify_command(&Features::new(-40., 250., 0.), Memory::NEUTRAL)
        .unwrap();
    let emotion = classifier
        .classify_emotion(&Features::new(0., -3., PITCH_MAX * 4.), Memory::LOW)
        .unwrap();

    assert!((0. ..=10.).contains(&command.value));
    assert!((0. ..=10.).contains(&emotion.value));
}

#[test]
fn test_memory_carries_across_calls() {
    let classifier = Classifier::new().unwrap();
    let mut memory = Memory::LOW;

    memory = classifier
        .classify_command(&Features::new(8., 9., 0.), memory)
        .unwrap()
        .memory;
    assert!(memory.is_high());

    memory = classifier
        .classify_command(&Features::new(5., 5., 0.), memory)
        .unwrap()
        .memory;
    assert!(memory.is_high());

    memory = classifier
        .classify_command(&Features::new(1., 1., 0.), memory)
        .unwrap()
        .memory;
    assert!(!memory.is_high());
}

#[test]
fn test_gapped_system_reports_no_result() {
    let mut vars = Variables::<Level>::new();
    let mut input_terms = Terms::new();

    input_terms.insert(Level::Low, [0., 0., 0.3]).unwrap();

    let input = vars.add("input", 0. ..=1., 0.1, input_terms).unwrap();
    let mut output_terms = Terms::new();

    output_terms.insert(Level::Low, [0., 0., 1.]).unwrap();
    output_terms.insert(Level::High, [0., 1., 1.]).unwrap();

    let output = vars.add("output", 0. ..=1., 0.1, output_terms).unwrap();
    let mut rules = Rules::new();

    rules.add(input.is(Level::Low), output.is(Level::High));

    let system = ControlSystem::new(vars, rules).unwrap();

    assert!(system.check_coverage().unwrap_err().is_config());

    let err = system.run(&Inputs::new().with(input, 0.8)).unwrap_err();

    assert!(err.is_no_result());
    assert!(matches!(err, FuzzyError::NoResult { ref variable } if variable == "output"));
    assert!(system.run(&Inputs::new().with(input, 0.1)).unwrap().get(output).is_some());
}

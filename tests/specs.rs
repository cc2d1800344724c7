use perceptron::{
    builder::TrainerBuilder,
    specs::{LearningRuleSpec, TrainerSpec, WeightInitSpec},
    NetErr,
};

const AND_SPEC: &str = include_str!("../demos/and.json");
const XOR_SPEC: &str = include_str!("../demos/xor.json");

#[test]
fn and_demo_trains_to_convergence() {
    let spec: TrainerSpec = serde_json::from_str(AND_SPEC).unwrap();
    assert!(spec.shuffle);

    let mut trainer = TrainerBuilder::new().build(&spec).unwrap();
    let outcome = trainer.train(&spec.exemplars).unwrap();
    assert!(outcome.is_converged(), "and ended with {outcome:?}");

    for exemplar in &spec.exemplars {
        let out = trainer.network_mut().predict(exemplar.inputs()).unwrap();
        assert_eq!(out, exemplar.desired());
    }
}

#[test]
fn xor_demo_trains_to_convergence() {
    let spec: TrainerSpec = serde_json::from_str(XOR_SPEC).unwrap();

    let mut trainer = TrainerBuilder::new().build(&spec).unwrap();
    let outcome = trainer.train(&spec.exemplars).unwrap();
    assert!(outcome.is_converged(), "xor ended with {outcome:?}");

    for exemplar in &spec.exemplars {
        let out = trainer.network_mut().predict(exemplar.inputs()).unwrap();
        assert_eq!(out[0].round(), exemplar.desired()[0]);
    }
}

#[test]
fn xor_demo_builds_a_backprop_trainer() {
    let spec: TrainerSpec = serde_json::from_str(XOR_SPEC).unwrap();

    let LearningRuleSpec::ErrorBackPropagation { config, error_max } = spec.rule else {
        panic!("expected error back propagation, got {:?}", spec.rule);
    };
    assert_eq!(config.learning_constant, 0.5);
    assert_eq!(error_max, Some(0.01));
    assert_eq!(spec.weights, WeightInitSpec::Uniform { low: -2., high: 2. });

    let trainer = TrainerBuilder::new().build(&spec).unwrap();
    let sizes: Vec<_> = trainer.network().layers().iter().map(|l| l.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(trainer.network().weights().len(), 6);
}

#[test]
fn spec_round_trips_through_json() {
    let spec: TrainerSpec = serde_json::from_str(XOR_SPEC).unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    let back: TrainerSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn missing_error_max_fails_when_training_starts() {
    let mut spec: TrainerSpec = serde_json::from_str(XOR_SPEC).unwrap();
    let LearningRuleSpec::ErrorBackPropagation { config, .. } = spec.rule else {
        panic!("expected error back propagation, got {:?}", spec.rule);
    };
    spec.rule = LearningRuleSpec::ErrorBackPropagation {
        config,
        error_max: None,
    };

    let mut trainer = TrainerBuilder::new().build(&spec).unwrap();
    assert_eq!(
        trainer.train(&spec.exemplars).unwrap_err(),
        NetErr::MissingErrorMax
    );
    assert!(trainer.network().weights().iter().all(|w| w.strength() == 0.));
}

#[test]
fn malformed_exemplars_are_rejected() {
    let mut spec: TrainerSpec = serde_json::from_str(AND_SPEC).unwrap();
    let short = serde_json::from_str(r#"{ "inputs": [1.0], "desired": [0.0] }"#).unwrap();
    spec.exemplars.push(short);

    let mut trainer = TrainerBuilder::new().build(&spec).unwrap();
    assert!(matches!(
        trainer.train(&spec.exemplars),
        Err(NetErr::SizeMismatch { what: "exemplar inputs", .. })
    ));
}

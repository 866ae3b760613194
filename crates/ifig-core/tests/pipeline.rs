//! End-to-end checks over enumerate + encode + dispatch.

mod common;

use std::collections::HashMap;

use common::{StubDomain, stub_renderer};
use ifig_core::{
    DispatchOptions, default_key, dispatch, dispatch_with, encode, encode_combination, enumerate,
};
use ifig_model::{Combination, FigureError, ParameterDomain, RenderOutput, Value};

#[test]
fn amplitude_color_scenario() {
    let amplitude = StubDomain::numeric("amplitude", &[0.1, 0.3, 0.5, 0.7, 0.9]);
    let color = StubDomain::text("color", &["blue", "green", "red"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&amplitude, &color];

    let combinations = enumerate(&domains).expect("enumerate");
    assert_eq!(combinations.len(), 15);
    // amplitude sorts before color, so every combination lists it first.
    for combination in &combinations {
        assert_eq!(combination.entries()[0].0, "amplitude");
        assert_eq!(combination.entries()[1].0, "color");
    }

    let default = default_key(&domains).expect("default key");
    assert_eq!(default.as_str(), "amplitude1.000000e-01colorblue");

    let output = dispatch(&domains, &mut stub_renderer()).expect("dispatch");
    assert_eq!(output.panels.len(), 15);
    assert_eq!(output.default_key, default);

    let visible: Vec<_> = output.panels.iter().filter(|p| p.visible).collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].key, default);
}

#[test]
fn text_only_scenario() {
    let f = StubDomain::text("f", &["sin", "cos"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&f];

    let output = dispatch(&domains, &mut stub_renderer()).expect("dispatch");
    assert_eq!(output.panels.len(), 2);
    assert_eq!(output.default_key.as_str(), "fsin");
    assert_eq!(output.panels[0].key.as_str(), "fsin");
    assert_eq!(output.panels[1].key.as_str(), "fcos");
    assert!(output.panels[0].visible);
    assert!(!output.panels[1].visible);
}

#[test]
fn panel_order_equals_enumeration_order() {
    let amplitude = StubDomain::numeric("amplitude", &[0.1, 0.3]);
    let color = StubDomain::text("color", &["blue", "green", "red"]);
    let f = StubDomain::text("f", &["sin", "cos"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&f, &color, &amplitude];

    let combinations = enumerate(&domains).expect("enumerate");
    let output = dispatch(&domains, &mut stub_renderer()).expect("dispatch");
    assert_eq!(output.panels.len(), combinations.len());
    for (panel, combination) in output.panels.iter().zip(&combinations) {
        assert_eq!(panel.key, encode_combination(combination));
    }
}

#[test]
fn dispatch_is_deterministic_across_runs() {
    let omega = StubDomain::numeric("omega", &[1.0, 3.0, 5.0]);
    let f = StubDomain::text("f", &["sin", "cos"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&omega, &f];

    let first = dispatch(&domains, &mut stub_renderer()).expect("first run");
    let second = dispatch(&domains, &mut stub_renderer()).expect("second run");
    let first_keys: Vec<_> = first.panels.iter().map(|p| p.key.clone()).collect();
    let second_keys: Vec<_> = second.panels.iter().map(|p| p.key.clone()).collect();
    assert_eq!(first_keys, second_keys);
    assert_eq!(first.default_key, second.default_key);
}

#[test]
fn render_failure_aborts_the_batch() {
    let f = StubDomain::text("f", &["sin", "cos"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&f];

    let mut renderer = |combination: &Combination| {
        if combination.get("f") == Some(&Value::from("cos")) {
            return Err("plot backend exploded".into());
        }
        Ok(RenderOutput {
            artifact: vec![1],
            caption: String::new(),
        })
    };
    let error = dispatch(&domains, &mut renderer).expect_err("render failure");
    match error {
        FigureError::RenderFailed { key, message } => {
            assert_eq!(key, "fcos");
            assert!(message.contains("plot backend exploded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn postprocess_applies_to_every_panel() {
    let f = StubDomain::text("f", &["sin", "cos"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&f];

    let recompress = |mut artifact: Vec<u8>| -> Result<Vec<u8>, ifig_core::BoxError> {
        artifact.push(0xFF);
        Ok(artifact)
    };
    let options = DispatchOptions {
        postprocess: Some(&recompress),
    };
    let output = dispatch_with(&domains, &mut stub_renderer(), &options).expect("dispatch");
    for panel in &output.panels {
        assert_eq!(panel.artifact.last(), Some(&0xFF));
    }
}

#[test]
fn incomplete_selection_is_rejected() {
    let amplitude = StubDomain::numeric("amplitude", &[0.1]);
    let color = StubDomain::text("color", &["blue"]);
    let domains: Vec<&dyn ParameterDomain> = vec![&amplitude, &color];

    let mut selection = HashMap::new();
    selection.insert("amplitude".to_string(), Value::Numeric(0.1));
    let error = encode(&domains, &selection).expect_err("partial selection");
    assert!(matches!(error, FigureError::IncompleteCombination { missing } if missing == "color"));

    selection.insert("color".to_string(), Value::from("blue"));
    selection.insert("omega".to_string(), Value::Numeric(1.0));
    let error = encode(&domains, &selection).expect_err("unknown parameter");
    assert!(matches!(error, FigureError::UnknownParameter { name } if name == "omega"));
}

#[test]
fn encode_is_independent_of_registration_order() {
    let amplitude = StubDomain::numeric("amplitude", &[0.1]);
    let color = StubDomain::text("color", &["blue"]);
    let forward: Vec<&dyn ParameterDomain> = vec![&amplitude, &color];
    let reverse: Vec<&dyn ParameterDomain> = vec![&color, &amplitude];

    let mut selection = HashMap::new();
    selection.insert("amplitude".to_string(), Value::Numeric(0.1));
    selection.insert("color".to_string(), Value::from("blue"));
    let a = encode(&forward, &selection).expect("forward");
    let b = encode(&reverse, &selection).expect("reverse");
    assert_eq!(a, b);
}

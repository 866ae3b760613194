//! Document assembly tests over the full control + dispatch pipeline.

use ifig_core::BoxError;
use ifig_document::{
    Control, DocumentOptions, DropdownControl, RadioControl, RangeControl, build_html,
    save_standalone_html,
};
use ifig_model::{Combination, RenderOutput};

fn demo_controls() -> (RangeControl, RadioControl, DropdownControl) {
    let amplitude = RangeControl::new("amplitude", 0.1, 1.0, 0.2).expect("amplitude control");
    let color = RadioControl::new("color", vec!["blue".into(), "green".into(), "red".into()])
        .expect("color control");
    let f = DropdownControl::new("f", vec!["sin".into(), "cos".into()]).expect("f control");
    (amplitude, color, f)
}

fn renderer() -> impl FnMut(&Combination) -> Result<RenderOutput, BoxError> {
    |combination: &Combination| {
        Ok(RenderOutput {
            artifact: b"not a real png".to_vec(),
            caption: format!("<{}>", combination.entries().len()),
        })
    }
}

#[test]
fn document_embeds_every_panel_with_one_visible() {
    let (amplitude, color, f) = demo_controls();
    let controls: Vec<&dyn Control> = vec![&f, &color, &amplitude];
    let html = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("build document");

    // 5 amplitudes x 3 colors x 2 functions.
    assert_eq!(html.matches("data:image/png;base64,").count(), 30);
    assert_eq!(html.matches("style=\"display:block\"").count(), 1);
    assert_eq!(html.matches("style=\"display:none\"").count(), 29);
    // The default container id is the all-defaults canonical key.
    assert!(html.contains("<div id=\"amplitude1.000000e-01colorbluefsin\" style=\"display:block\""));
}

#[test]
fn captions_are_escaped() {
    let (amplitude, color, f) = demo_controls();
    let controls: Vec<&dyn Control> = vec![&amplitude, &color, &f];
    let html = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("build document");
    assert!(html.contains("<div class=\"ifigurecaption\">&lt;3&gt;</div>"));
    assert!(!html.contains("<div class=\"ifigurecaption\"><3></div>"));
}

#[test]
fn controls_render_in_canonical_name_order() {
    let (amplitude, color, f) = demo_controls();
    // Registration order deliberately scrambled.
    let controls: Vec<&dyn Control> = vec![&f, &amplitude, &color];
    let html = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("build document");

    let amplitude_at = html.find("name=\"amplitude\"").expect("amplitude control");
    let color_at = html.find("name=\"color\"").expect("color control");
    let f_at = html.find("name=\"f\"").expect("f control");
    assert!(amplitude_at < color_at);
    assert!(color_at < f_at);
}

#[test]
fn beautify_toggles_the_control_skin() {
    let (amplitude, color, f) = demo_controls();
    let controls: Vec<&dyn Control> = vec![&amplitude, &color, &f];
    let plain = build_html(
        &controls,
        &mut renderer(),
        &DocumentOptions {
            beautify: false,
            ..DocumentOptions::default()
        },
    )
    .expect("plain document");
    assert!(!plain.contains("Source Sans Pro"));

    let styled = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("styled document");
    assert!(styled.contains("Source Sans Pro"));
}

#[test]
fn client_script_pads_exponents_like_the_encoder() {
    let (amplitude, color, f) = demo_controls();
    let controls: Vec<&dyn Control> = vec![&amplitude, &color, &f];
    let html = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("build document");
    // The in-document formatter must pad toExponential's bare exponent to
    // two digits, otherwise live keys can never match baked container ids.
    assert!(html.contains("toExponential(6).replace(/e([+-])(\\d)$/, \"e$10$2\")"));
}

#[test]
fn save_writes_the_document() {
    let (amplitude, color, f) = demo_controls();
    let controls: Vec<&dyn Control> = vec![&amplitude, &color, &f];
    let dir = tempfile::tempdir().expect("out dir");
    let path = dir.path().join("interactive_figure.html");
    save_standalone_html(&path, &controls, &mut renderer(), &DocumentOptions::default())
        .expect("save document");
    let html = std::fs::read_to_string(&path).expect("read back");
    assert!(html.starts_with("<!doctype html>"));
}

#[test]
fn identical_inputs_produce_identical_documents() {
    let (amplitude, color, f) = demo_controls();
    let controls: Vec<&dyn Control> = vec![&amplitude, &color, &f];
    let first = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("first build");
    let second = build_html(&controls, &mut renderer(), &DocumentOptions::default())
        .expect("second build");
    assert_eq!(first, second);
}

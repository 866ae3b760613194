use std::fs;

use ifig_cli::commands::{DemoConfig, run_demo};
use tempfile::tempdir;

fn config(output_dir: std::path::PathBuf) -> DemoConfig {
    DemoConfig {
        output_dir,
        panels_per_row: 3,
        dpi: 150,
        label_panels: false,
        no_grid: false,
        tex_cache: None,
    }
}

#[test]
fn demo_writes_document_and_grid() {
    let dir = tempdir().expect("create temp dir");
    let summary = run_demo(&config(dir.path().join("out"))).expect("run demo");

    assert_eq!(summary.panel_count, 30);
    assert!(summary.html_path.exists());
    let grid_path = summary.grid_path.as_ref().expect("grid path");
    assert!(grid_path.exists());

    let html = fs::read_to_string(&summary.html_path).expect("read document");
    assert!(html.contains("amplitude1.000000e-01colorbluefsin"));

    // 30 panels exceed the alphabet, so labels are numeric.
    let caption = summary.grid_caption.as_ref().expect("grid caption");
    assert!(caption.starts_with("(0)"));
}

#[test]
fn demo_without_grid_writes_only_the_document() {
    let dir = tempdir().expect("create temp dir");
    let mut config = config(dir.path().join("out"));
    config.no_grid = true;
    let summary = run_demo(&config).expect("run demo");

    assert!(summary.html_path.exists());
    assert!(summary.grid_path.is_none());
    assert!(!dir.path().join("out").join("static_figure.png").exists());
}

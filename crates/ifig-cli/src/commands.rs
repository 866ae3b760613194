//! Demo pipeline orchestration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use ifig_core::{dispatch, encode_combination, enumerate};
use ifig_document::{
    Control, DocumentOptions, DropdownControl, RadioControl, RangeControl, render_document,
};
use ifig_grid::{GridOptions, compose_to_file};
use ifig_latex::LatexCache;
use ifig_model::ParameterDomain;

use crate::demo::WaveRenderer;

/// Settings for the demo bake, decoupled from the clap argument structs.
pub struct DemoConfig {
    pub output_dir: PathBuf,
    pub panels_per_row: usize,
    pub dpi: u32,
    pub label_panels: bool,
    pub no_grid: bool,
    pub tex_cache: Option<PathBuf>,
}

/// What the demo produced.
pub struct DemoSummary {
    pub html_path: PathBuf,
    pub grid_path: Option<PathBuf>,
    pub panel_count: usize,
    pub grid_caption: Option<String>,
}

fn demo_controls() -> Result<(RangeControl, RadioControl, DropdownControl)> {
    let amplitude =
        RangeControl::new("amplitude", 0.1, 1.0, 0.2).context("build amplitude control")?;
    let color = RadioControl::new("color", vec!["blue".into(), "green".into(), "red".into()])
        .context("build color control")?;
    let f = DropdownControl::new("f", vec!["sin".into(), "cos".into()])
        .context("build function control")?;
    Ok((amplitude, color, f))
}

/// Bakes the demo figure: one interactive document and, unless disabled,
/// one static grid from the same dispatch.
pub fn run_demo(config: &DemoConfig) -> Result<DemoSummary> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("create output directory {}", config.output_dir.display()))?;

    let (amplitude, color, f) = demo_controls()?;
    let controls: Vec<&dyn Control> = vec![&amplitude, &color, &f];
    let domains: Vec<&dyn ParameterDomain> = controls
        .iter()
        .map(|control| *control as &dyn ParameterDomain)
        .collect();

    let mut renderer = WaveRenderer::new(480, 280);
    let output = dispatch(&domains, &mut renderer).context("dispatch panel renders")?;

    let html_path = config.output_dir.join("interactive_figure.html");
    let html = render_document(&controls, &output, &DocumentOptions::default());
    fs::write(&html_path, html)
        .with_context(|| format!("write interactive document {}", html_path.display()))?;
    info!(path = %html_path.display(), panels = output.panels.len(), "interactive document written");

    let mut summary = DemoSummary {
        html_path,
        grid_path: None,
        panel_count: output.panels.len(),
        grid_caption: None,
    };
    if config.no_grid {
        return Ok(summary);
    }

    let cache;
    let mut grid_options = GridOptions {
        panels_per_row: config.panels_per_row,
        label_panels: config.label_panels,
        dpi: config.dpi,
        ..GridOptions::default()
    };
    if config.label_panels {
        let cache_dir = config
            .tex_cache
            .clone()
            .unwrap_or_else(|| config.output_dir.join("tex-cache"));
        cache = LatexCache::new(cache_dir).context("open label cache")?;
        grid_options.rasterizer = Some(&cache);
    }

    let grid_path = config.output_dir.join("static_figure.png");
    let grid = compose_to_file(&output.panels, &grid_options, &grid_path)
        .context("compose static grid")?;
    info!(path = %grid_path.display(), "static grid written");
    summary.grid_path = Some(grid_path);
    summary.grid_caption = Some(grid.caption);
    Ok(summary)
}

/// Prints every canonical key of the demo parameter space, one per line,
/// in enumeration order.
pub fn run_keys() -> Result<()> {
    let (amplitude, color, f) = demo_controls()?;
    let domains: Vec<&dyn ParameterDomain> = vec![&amplitude, &color, &f];
    for combination in enumerate(&domains).context("enumerate demo domains")? {
        println!("{}", encode_combination(&combination));
    }
    Ok(())
}

//! Human-readable result summary for the demo bake.

use crate::commands::DemoSummary;

pub fn print_summary(summary: &DemoSummary) {
    println!(
        "baked {} panels into {}",
        summary.panel_count,
        summary.html_path.display()
    );
    if let Some(grid_path) = &summary.grid_path {
        println!("static grid written to {}", grid_path.display());
    }
    if let Some(caption) = &summary.grid_caption {
        println!("caption: {caption}");
    }
}

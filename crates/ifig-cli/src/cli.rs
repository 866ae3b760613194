//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ifig",
    version,
    about = "Bake parameterized figures into self-contained interactive documents",
    long_about = "Render every combination of a discrete parameter space ahead of time,\n\
                  bake the panels into one standalone HTML document with client-side\n\
                  toggling, and optionally compose the same panels into a static grid."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bake the built-in demo figure (interactive document + static grid).
    Demo(DemoArgs),

    /// Print the canonical keys of the demo parameter space, one per line.
    Keys,
}

#[derive(Parser)]
pub struct DemoArgs {
    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Panels per row in the static grid.
    #[arg(long = "panels-per-row", value_name = "N", default_value_t = 3)]
    pub panels_per_row: usize,

    /// Resolution metadata for the static grid, in dots per inch.
    #[arg(long = "dpi", value_name = "DPI", default_value_t = 300)]
    pub dpi: u32,

    /// Stamp (a), (b), ... labels onto grid panels.
    ///
    /// Requires pdflatex and ImageMagick on PATH.
    #[arg(long = "label-panels")]
    pub label_panels: bool,

    /// Skip the static grid and write only the interactive document.
    #[arg(long = "no-grid")]
    pub no_grid: bool,

    /// Cache directory for rasterized labels (default: <OUTPUT_DIR>/tex-cache).
    #[arg(long = "tex-cache", value_name = "DIR")]
    pub tex_cache: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! Interactive figure baking CLI.

use clap::{ColorChoice, Parser};
use ifig_cli::commands::{DemoConfig, run_demo, run_keys};
use ifig_cli::logging::{LogConfig, LogFormat, init_logging};
use ifig_cli::summary::print_summary;
use std::io::{self, IsTerminal};

mod cli;

use crate::cli::{Cli, Command, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Demo(args) => {
            let config = DemoConfig {
                output_dir: args.output_dir,
                panels_per_row: args.panels_per_row,
                dpi: args.dpi,
                label_panels: args.label_panels,
                no_grid: args.no_grid,
                tex_cache: args.tex_cache,
            };
            match run_demo(&config) {
                Ok(summary) => {
                    print_summary(&summary);
                    0
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Command::Keys => match run_keys() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

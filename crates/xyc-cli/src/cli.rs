//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;
use xyc_core::render::DEFAULT_OUTPUT;

const GRAMMAR_HELP: &str = r"CONFIGURATION SYNTAX

Anything from '#' to the end of a line is ignored. The first non-comment line
must be the activation token, alone on its line:

    __xyc__

Each CSV file to plot gets its own __file__ line. Every series is an x column,
a y column and an optional label (the y column name is used when omitted):

    __file__: file_1.csv: xcol_1, ycol_1, label_1; \
                          xcol_2, ycol_2, label_2;

A trailing '\' joins the next line onto the current one. Relative CSV paths
are resolved against the directory of the configuration file. The final ';'
of any list is optional.

Exactly one __params__ line names the axes and title:

    __params__: x_label, y_label, plot_title

Exactly one __format__ line gives either a single specifier applied to every
series, or one specifier per series. Specifiers use the matplotlib shorthand
(colour letter, marker, '-' or '--'); 'auto' picks colours by itself. Dotted
lines (':') cannot be written here, since ':' always splits the line:

    __format__: r^, b-, mo

The configuration ends with __end__ on its own line. Leaving it out only
produces a warning.

Series whose columns are missing from their CSV file are skipped with a
warning; the remaining series keep their own format specifiers.";

/// XYC - plot xy series from CSV files described by a configuration file
#[derive(Parser, Debug)]
#[command(name = "xyc")]
#[command(author, version, about, long_about = None)]
#[command(after_long_help = GRAMMAR_HELP)]
pub struct Cli {
    /// Configuration file (must end in .xyc)
    pub config: PathBuf,

    /// Output image (.png or .jpg)
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// TOML file with render settings
    #[arg(long, env = "XYC_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Print the render request as JSON instead of drawing it
    #[arg(long, conflicts_with = "check")]
    pub dry_run: bool,

    /// Parse and validate the configuration, then print a summary
    #[arg(long)]
    pub check: bool,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default log directive for the selected verbosity.
    pub fn log_directive(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            None
        }
    }
}

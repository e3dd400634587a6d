use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::cli::{color_when::ColorWhen, mode::Mode};

/// Diff two text files and print the result as an annotated document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The original text
    #[arg(index = 1)]
    pub base: PathBuf,

    /// The changed text
    #[arg(index = 2)]
    pub candidate: PathBuf,

    /// YAML file overriding the default markers
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = Mode::Annotate, value_enum)]
    pub mode: Mode,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    #[arg(
            long,
            value_name = "WHEN",
            default_value_t = ColorWhen::Auto,
            default_missing_value = "always",
            value_enum
        )]
    pub color: ColorWhen,
}

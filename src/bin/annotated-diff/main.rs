mod cli;
mod config;
mod errors;
mod render;

use std::{
    io::{self, Write as _},
    path::Path,
};

use annotated_diff::{
    Document, compute_diff_annotated_document, resolve_all, revert_all, serialize_to_plain_text,
};
use anyhow::{Context as _, Result};
use clap::Parser as _;
use cli::{args::Args, mode::Mode};
use config::Config;
use errors::{CliError, init_error, input_error};
use log::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), CliError> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={}",
                    env!("CARGO_CRATE_NAME"),
                    args.verbose.log_level_filter()
                )
                .to_lowercase()
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(args.color.use_colors()),
        )
        .try_init()
        .context("Failed to initialise tracing")
        .map_err(init_error)?;

    let config = Config::load(args.config.as_deref()).map_err(init_error)?;
    debug!("Using {config:?}");

    let base = read_text(&args.base).map_err(input_error)?;
    let candidate = read_text(&args.candidate).map_err(input_error)?;

    let document = compute_diff_annotated_document(&Document::from_text(&base), &candidate)?;
    info!(
        "Found {} pending changes across {} blocks",
        document.annotation_count(),
        document.blocks().len()
    );

    let output = match args.mode {
        Mode::Annotate => render::render_annotated(&document, &config, args.color.use_colors()),
        Mode::Resolve => serialize_to_plain_text(&resolve_all(document)),
        Mode::Revert => serialize_to_plain_text(&revert_all(document)),
        Mode::List => render::render_list(&document),
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
}

use annotated_diff::ProjectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Initialisation error: {0:?}")]
    InitError(#[source] anyhow::Error),

    #[error("Input error: {0:?}")]
    InputError(#[source] anyhow::Error),

    #[error("Failed to annotate the diff: {0}")]
    ProjectionError(#[from] ProjectionError),

    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),
}

pub const fn init_error(error: anyhow::Error) -> CliError { CliError::InitError(error) }

pub const fn input_error(error: anyhow::Error) -> CliError { CliError::InputError(error) }

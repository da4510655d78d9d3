//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use span_sampler::SamplingError;
use thiserror::Error;

use crate::output::ContextError;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to configure logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read input {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("cannot detect the language of {}; pass --language", path.display())]
    UnknownLanguage { path: PathBuf },
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    #[error("failed to extract span context: {0}")]
    Context(#[from] ContextError),
    #[error("failed to serialise span: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

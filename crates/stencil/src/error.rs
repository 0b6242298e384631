//! Error types for Stencil operations.
//!
//! [`StencilError`] is the top-level error, wrapping the errors of model
//! loading, registry construction, rendering and command execution.

use std::io;

use thiserror::Error;

use stencil_core::{command::CommandError, semantic::ModelError};

use crate::{mapper::MappingError, registry::RegistryError, revision::RevisionError};

/// The main error type for Stencil operations.
///
/// # Diagnostic Variants
///
/// The `ModelFormat` variant keeps the JSON source it failed on, so line and
/// column of the underlying [`serde_json::Error`] can be turned into a
/// labelled span.
#[derive(Debug, Error)]
pub enum StencilError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    ModelFormat { err: serde_json::Error, src: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Revision error: {0}")]
    Revision(#[from] RevisionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(serde_json::Error),
}

impl StencilError {
    /// Create a new `ModelFormat` error with the associated JSON source.
    pub fn new_model_format_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::ModelFormat {
            err,
            src: src.into(),
        }
    }
}

//! CLI logic for the Stencil diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{debug, info};

use stencil::{DiagramBuilder, StencilError, revision::Timeline, semantic::Model};

/// Run the Stencil CLI application
///
/// Loads the model named by `args.input`, renders the requested
/// representation and writes the graphical model as JSON to `args.output`.
/// With `args.snapshot` set, the loaded model is also appended to the
/// revision timeline stored at [`timeline_path`].
///
/// # Errors
///
/// Returns `StencilError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or inconsistent models
/// - Representations that are not enabled
/// - Mapping failures under strict mapping
pub fn run(args: &Args) -> Result<(), StencilError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        representation:% = args.representation;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config)?;
    let model = builder.load_model(&source)?;
    let json = builder.render_json(&model, args.representation)?;

    if let Some(message) = &args.snapshot {
        record_snapshot(&timeline_path(&args.output), &model, message)?;
    }

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Graphical model exported successfully");

    Ok(())
}

/// Path of the revision timeline kept next to `output`.
pub fn timeline_path(output: &str) -> String {
    format!("{output}.timeline.json")
}

fn record_snapshot(path: &str, model: &Model, message: &str) -> Result<(), StencilError> {
    let mut timeline = if Path::new(path).exists() {
        Timeline::from_json(&fs::read_to_string(path)?)?
    } else {
        debug!(path; "Starting a new revision timeline");
        Timeline::new()
    };

    let id = timeline.record(model, message).id();
    fs::write(path, timeline.to_json()?)?;

    info!(path, id; "Model snapshot recorded");
    Ok(())
}

//! Stencil - UML element bindings for a graphical-model diagram server.
//!
//! For every supported UML element kind this crate declares how it is drawn
//! as a graphical node or edge, how it is created from a diagram gesture,
//! which of its properties are editable, and how it is registered per
//! representation (class, package, sequence and use-case diagrams).
//!
//! The bindings are plain trait objects collected into a
//! [`registry::Registry`]; [`DiagramBuilder`] wires them to a configuration
//! and renders semantic models into graphical models. [`revision::Timeline`]
//! keeps restorable snapshots of a model.

pub mod config;
pub mod configuration;
pub mod context;
pub mod elements;
pub mod gmodel_factory;
pub mod label_edit;
pub mod manifest;
pub mod mapper;
pub mod operation;
pub mod property;
pub mod registry;
pub mod representations;
pub mod revision;

mod error;

pub use stencil_core::{command, gmodel, identifier, semantic, uml};

pub use error::StencilError;

use log::{debug, info, trace};

use stencil_core::{
    command::Command,
    gmodel::GModelElement,
    semantic::{Model, ModelDocument},
    uml::Representation,
};

use config::AppConfig;
use gmodel_factory::GModelFactory;
use registry::{Registry, RepresentationRegistry};

/// Entry point for loading semantic models and rendering their diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use stencil::{DiagramBuilder, config::AppConfig, uml::Representation};
///
/// let source = std::fs::read_to_string("model.json").expect("Failed to read");
/// let builder = DiagramBuilder::new(AppConfig::default()).expect("Invalid bindings");
///
/// let model = builder.load_model(&source).expect("Failed to load");
/// let json = builder
///     .render_json(&model, Representation::Class)
///     .expect("Failed to render");
/// println!("{json}");
/// ```
pub struct DiagramBuilder {
    config: AppConfig,
    registry: Registry,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// Registers the bindings of every representation enabled in
    /// `config.diagram()`.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Registry` if the bindings of a representation
    /// conflict, or if a representation is enabled twice.
    pub fn new(config: AppConfig) -> Result<Self, StencilError> {
        let mut registry = Registry::new();
        for representation in config.diagram().representations() {
            let table = RepresentationRegistry::build(
                *representation,
                &representations::manifests(*representation),
            )?
            .with_options(*config.style(), config.diagram().strict_mapping());
            registry.register(table)?;
        }
        info!(
            representations = config.diagram().representations().len();
            "Diagram builder ready"
        );
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse a JSON model document into a semantic model.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::ModelFormat` for malformed JSON and
    /// `StencilError::Model` for documents with inconsistent containment.
    pub fn load_model(&self, source: &str) -> Result<Model, StencilError> {
        info!("Loading model");
        let document: ModelDocument = serde_json::from_str(source)
            .map_err(|err| StencilError::new_model_format_error(err, source))?;
        let model = Model::from_document(document)?;
        debug!(elements = model.len(); "Model loaded successfully");
        Ok(model)
    }

    /// Render the graphical model of `model` in `representation`.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Registry` if the representation is not
    /// enabled, and `StencilError::Mapping` when strict mapping is on and an
    /// element cannot be drawn.
    pub fn render(
        &self,
        model: &Model,
        representation: Representation,
    ) -> Result<GModelElement, StencilError> {
        info!(representation:% = representation; "Rendering graphical model");
        let registry = self.registry.get(representation)?;
        let graph = GModelFactory::new(registry).create_root(model)?;
        trace!(graph:?; "Rendered graph");
        Ok(graph)
    }

    /// Render the graphical model as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::render`]; serialization failures are
    /// `StencilError::Export`.
    pub fn render_json(
        &self,
        model: &Model,
        representation: Representation,
    ) -> Result<String, StencilError> {
        let graph = self.render(model, representation)?;
        serde_json::to_string_pretty(&graph).map_err(StencilError::Export)
    }

    /// Execute a command returned by one of the registry operations.
    ///
    /// # Errors
    ///
    /// Returns `StencilError::Command` if the command fails; the model is
    /// left unchanged in that case.
    pub fn execute(&self, model: &mut Model, command: &mut dyn Command) -> Result<(), StencilError> {
        debug!(command = command.label(); "Executing command");
        command.execute(model)?;
        Ok(())
    }
}

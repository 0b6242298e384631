//! Binding registry.
//!
//! [`RepresentationRegistry`] is the dispatch table of one representation,
//! keyed by type key. It routes every inbound request (render, type hints,
//! create, property palette, label edit) to the providers the manifests
//! bound. [`Registry`] holds one table per enabled representation.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};
use thiserror::Error;

use stencil_core::{
    command::{Command, NoopCommand},
    gmodel::GModelElement,
    identifier::Id,
    semantic::{Element, Model, ModelError},
    uml::{Representation, TypeKey, UmlType},
};

use crate::{
    config::StyleConfig,
    configuration::{ConfigurationContext, EdgeTypeHint, ShapeCategory, ShapeTypeHint},
    context::{ElementMapping, ProviderContext},
    manifest::{ElementBinder, ElementBindings, ElementManifest},
    mapper::MappingError,
    operation::CreateOperation,
    property::{PropertyItem, PropertyUpdate},
};

/// Errors raised while building or querying the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("{binding} for `{type_key}` is bound twice")]
    DuplicateBinding {
        type_key: TypeKey,
        binding: &'static str,
    },

    #[error("`{type_key}` has no {binding}")]
    IncompleteBinding {
        type_key: TypeKey,
        binding: &'static str,
    },

    #[error("representation `{0}` is registered twice")]
    DuplicateRepresentation(Representation),

    #[error("representation `{0}` is not registered")]
    UnknownRepresentation(Representation),

    #[error("invalid label for `{id}`: {message}")]
    InvalidLabel { id: Id, message: String },

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// The bindings of one representation.
pub struct RepresentationRegistry {
    representation: Representation,
    bindings: IndexMap<TypeKey, ElementBindings>,
    type_mappings: IndexMap<TypeKey, ShapeCategory>,
    registered: IndexSet<TypeKey>,
    style: StyleConfig,
    strict_mapping: bool,
}

impl RepresentationRegistry {
    /// Runs every manifest against a fresh binder and indexes the result.
    ///
    /// # Errors
    ///
    /// Fails on duplicate or incomplete bindings and on type keys mapped by
    /// two configurations.
    pub fn build(
        representation: Representation,
        manifests: &[Box<dyn ElementManifest>],
    ) -> Result<Self, RegistryError> {
        let mut binder = ElementBinder::new(representation);
        for manifest in manifests {
            manifest.configure(&mut binder)?;
        }
        let bindings = binder.finish()?;

        let mut type_mappings = IndexMap::new();
        for bindings in bindings.values() {
            let Some(configuration) = &bindings.configuration else {
                continue;
            };
            for (key, category) in configuration.type_mappings() {
                if type_mappings.insert(key, category).is_some() {
                    return Err(RegistryError::DuplicateBinding {
                        type_key: key,
                        binding: "type mapping",
                    });
                }
            }
        }
        let registered = bindings.keys().copied().collect();

        info!(representation:% = representation, types = bindings.len(); "Representation registered");
        Ok(Self {
            representation,
            bindings,
            type_mappings,
            registered,
            style: StyleConfig::default(),
            strict_mapping: false,
        })
    }

    /// Sets the rendering options passed to bindings.
    pub fn with_options(mut self, style: StyleConfig, strict_mapping: bool) -> Self {
        self.style = style;
        self.strict_mapping = strict_mapping;
        self
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Registered type keys, in manifest order.
    pub fn type_keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.registered.iter().copied()
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mapping
    }

    /// The request context for `model`, dispatching child mapping back here.
    pub fn context<'a>(&'a self, model: &'a Model) -> ProviderContext<'a> {
        ProviderContext::new(self.representation, model)
            .with_style(self.style)
            .with_strict_mapping(self.strict_mapping)
            .with_mapping(self)
    }

    fn configuration_context(&self) -> ConfigurationContext<'_> {
        ConfigurationContext::new(self.representation, &self.registered)
    }

    fn bindings_for(&self, element: &Element) -> Option<&ElementBindings> {
        self.bindings
            .get(&TypeKey::new(self.representation, element.uml_type()))
    }

    /// Maps one element of `model` to its graphical element.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist, has no mapper, or its mapper fails.
    pub fn map(&self, model: &Model, id: Id) -> Result<GModelElement, MappingError> {
        let element = model.element(id)?;
        self.map_element(&self.context(model), element)
    }

    /// All type keys with their graphical category.
    pub fn type_mappings(&self) -> &IndexMap<TypeKey, ShapeCategory> {
        &self.type_mappings
    }

    pub fn graph_containable_elements(&self) -> Vec<TypeKey> {
        self.bindings
            .values()
            .filter_map(|b| b.configuration.as_ref())
            .flat_map(|c| c.graph_containable_elements())
            .collect()
    }

    pub fn shape_type_hints(&self) -> Vec<ShapeTypeHint> {
        let ctx = self.configuration_context();
        self.bindings
            .values()
            .filter_map(|b| b.configuration.as_ref())
            .flat_map(|c| c.shape_type_hints(&ctx))
            .collect()
    }

    pub fn edge_type_hints(&self) -> Vec<EdgeTypeHint> {
        let ctx = self.configuration_context();
        self.bindings
            .values()
            .filter_map(|b| b.configuration.as_ref())
            .flat_map(|c| c.edge_type_hints(&ctx))
            .collect()
    }

    /// Returns true if a create handler accepts `operation`.
    pub fn can_create(&self, model: &Model, operation: &CreateOperation) -> bool {
        self.bindings
            .get(&operation.element_type())
            .and_then(|b| b.create_handler.as_ref())
            .is_some_and(|handler| handler.can_create(&self.context(model), operation))
    }

    /// Returns the command performing `operation`, or `None` if no create
    /// handler accepts it.
    pub fn create(&self, model: &Model, operation: &CreateOperation) -> Option<Box<dyn Command>> {
        let Some(handler) = self
            .bindings
            .get(&operation.element_type())
            .and_then(|b| b.create_handler.as_ref())
        else {
            debug!(element_type:% = operation.element_type(); "No create handler");
            return None;
        };
        handler.handle(&self.context(model), operation)
    }

    /// Property items of an element from every bound provider, in binding order.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist.
    pub fn provide_properties(
        &self,
        model: &Model,
        id: Id,
    ) -> Result<Vec<PropertyItem>, RegistryError> {
        let element = model.element(id)?;
        let ctx = self.context(model);
        Ok(self
            .bindings_for(element)
            .map(|b| {
                b.property_providers
                    .iter()
                    .flat_map(|provider| provider.provide(&ctx, element))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Returns the command applying `update`.
    ///
    /// The first provider managing the property handles it; if none does, the
    /// command is a no-op.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist.
    pub fn update_property(
        &self,
        model: &Model,
        update: &PropertyUpdate,
    ) -> Result<Box<dyn Command>, RegistryError> {
        let element = model.element(update.element_id())?;
        let ctx = self.context(model);
        let provider = self.bindings_for(element).and_then(|b| {
            b.property_providers
                .iter()
                .find(|provider| provider.setters().contains(update.property_id()))
        });
        Ok(match provider {
            Some(provider) => provider.handle(&ctx, update, element),
            None => {
                debug!(id:% = element.id(), property = update.property_id(); "No provider manages property");
                Box::new(NoopCommand::new(format!("Set {}", update.property_id())))
            }
        })
    }

    /// Returns the command renaming an element through its label.
    ///
    /// `Ok(None)` means no label-edit handler is bound for the element.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist or the text is rejected.
    pub fn edit_label(
        &self,
        model: &Model,
        id: Id,
        text: &str,
    ) -> Result<Option<Box<dyn Command>>, RegistryError> {
        let element = model.element(id)?;
        let ctx = self.context(model);
        let Some(bindings) = self.bindings_for(element) else {
            return Ok(None);
        };
        for handler in &bindings.label_edit_handlers {
            handler
                .validate(&ctx, element, text)
                .map_err(|message| RegistryError::InvalidLabel { id, message })?;
            if let Some(command) = handler.edit_label(&ctx, element, text) {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }
}

impl ElementMapping for RepresentationRegistry {
    fn category(&self, uml_type: UmlType) -> Option<ShapeCategory> {
        self.type_mappings
            .get(&TypeKey::new(self.representation, uml_type))
            .copied()
    }

    fn map_element(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        let key = TypeKey::new(self.representation, element.uml_type());
        let mapper = self
            .bindings
            .get(&key)
            .and_then(|b| b.mapper.as_ref())
            .ok_or(MappingError::NoMapper(key))?;
        mapper.map(ctx, element)
    }
}

/// Dispatch tables of all registered representations.
#[derive(Default)]
pub struct Registry {
    representations: IndexMap<Representation, RepresentationRegistry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the table of one representation.
    ///
    /// # Errors
    ///
    /// Fails if the representation is already registered.
    pub fn register(&mut self, registry: RepresentationRegistry) -> Result<(), RegistryError> {
        let representation = registry.representation();
        if self.representations.contains_key(&representation) {
            return Err(RegistryError::DuplicateRepresentation(representation));
        }
        self.representations.insert(representation, registry);
        Ok(())
    }

    /// Returns the table of `representation`.
    ///
    /// # Errors
    ///
    /// Fails if the representation was not registered.
    pub fn get(&self, representation: Representation) -> Result<&RepresentationRegistry, RegistryError> {
        self.representations
            .get(&representation)
            .ok_or(RegistryError::UnknownRepresentation(representation))
    }

    /// Registered representations, in registration order.
    pub fn representations(&self) -> impl Iterator<Item = Representation> + '_ {
        self.representations.keys().copied()
    }
}

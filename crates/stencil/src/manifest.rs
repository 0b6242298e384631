//! Element manifests and the binder they register through.
//!
//! A manifest declares everything one element kind contributes to a
//! representation: its mapper, configuration, create handler, label-edit
//! handlers and property providers. The binder rejects a second mapper,
//! configuration or create handler for the same type key, so conflicting
//! manifests fail registry construction instead of silently overriding each
//! other.

use indexmap::IndexMap;
use log::trace;

use stencil_core::uml::{Representation, TypeKey, UmlType};

use crate::{
    configuration::ElementConfiguration, label_edit::LabelEditHandler, mapper::GModelMapper,
    operation::OperationHandler, property::PropertyProvider, registry::RegistryError,
};

/// Registers the bindings of one element kind.
pub trait ElementManifest: Send + Sync {
    /// The metaclass this manifest binds.
    fn uml_type(&self) -> UmlType;

    /// Binds the manifest's providers for the binder's representation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateBinding`] when a provider slot of
    /// the type key is already taken.
    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError>;
}

/// The providers bound to one type key.
#[derive(Default)]
pub(crate) struct ElementBindings {
    pub(crate) mapper: Option<Box<dyn GModelMapper>>,
    pub(crate) configuration: Option<Box<dyn ElementConfiguration>>,
    pub(crate) create_handler: Option<Box<dyn OperationHandler>>,
    pub(crate) label_edit_handlers: Vec<Box<dyn LabelEditHandler>>,
    pub(crate) property_providers: Vec<Box<dyn PropertyProvider>>,
}

/// Collects the bindings of a representation while manifests configure.
pub struct ElementBinder {
    representation: Representation,
    bindings: IndexMap<TypeKey, ElementBindings>,
}

impl ElementBinder {
    pub fn new(representation: Representation) -> Self {
        Self {
            representation,
            bindings: IndexMap::new(),
        }
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// The type key of `uml_type` in the binder's representation.
    pub fn type_key(&self, uml_type: UmlType) -> TypeKey {
        TypeKey::new(self.representation, uml_type)
    }

    fn slot(&mut self, uml_type: UmlType) -> (TypeKey, &mut ElementBindings) {
        let key = self.type_key(uml_type);
        (key, self.bindings.entry(key).or_default())
    }

    pub fn bind_mapper(
        &mut self,
        uml_type: UmlType,
        mapper: impl GModelMapper + 'static,
    ) -> Result<(), RegistryError> {
        let (key, slot) = self.slot(uml_type);
        if slot.mapper.is_some() {
            return Err(RegistryError::DuplicateBinding {
                type_key: key,
                binding: "mapper",
            });
        }
        slot.mapper = Some(Box::new(mapper));
        trace!(type_key:% = key; "Mapper bound");
        Ok(())
    }

    /// Binds a configuration under its own type key.
    pub fn bind_configuration(
        &mut self,
        configuration: impl ElementConfiguration + 'static,
    ) -> Result<(), RegistryError> {
        let key = configuration.type_key();
        let slot = self.bindings.entry(key).or_default();
        if slot.configuration.is_some() {
            return Err(RegistryError::DuplicateBinding {
                type_key: key,
                binding: "configuration",
            });
        }
        slot.configuration = Some(Box::new(configuration));
        Ok(())
    }

    /// Binds a create handler under the type key it creates.
    pub fn bind_create_handler(
        &mut self,
        handler: impl OperationHandler + 'static,
    ) -> Result<(), RegistryError> {
        let key = handler.element_type();
        let slot = self.bindings.entry(key).or_default();
        if slot.create_handler.is_some() {
            return Err(RegistryError::DuplicateBinding {
                type_key: key,
                binding: "create handler",
            });
        }
        slot.create_handler = Some(Box::new(handler));
        Ok(())
    }

    pub fn bind_label_edit(&mut self, uml_type: UmlType, handler: impl LabelEditHandler + 'static) {
        let (_, slot) = self.slot(uml_type);
        slot.label_edit_handlers.push(Box::new(handler));
    }

    pub fn bind_property_provider(
        &mut self,
        uml_type: UmlType,
        provider: impl PropertyProvider + 'static,
    ) {
        let (_, slot) = self.slot(uml_type);
        slot.property_providers.push(Box::new(provider));
    }

    /// Finishes binding, checking every type key has a mapper and a
    /// configuration.
    pub(crate) fn finish(self) -> Result<IndexMap<TypeKey, ElementBindings>, RegistryError> {
        for (key, bindings) in &self.bindings {
            if bindings.mapper.is_none() {
                return Err(RegistryError::IncompleteBinding {
                    type_key: *key,
                    binding: "mapper",
                });
            }
            if bindings.configuration.is_none() {
                return Err(RegistryError::IncompleteBinding {
                    type_key: *key,
                    binding: "configuration",
                });
            }
        }
        Ok(self.bindings)
    }
}

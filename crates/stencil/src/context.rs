//! Request context passed to every binding.

use log::{trace, warn};

use stencil_core::{
    gmodel::GModelElement,
    semantic::{Element, Model},
    uml::{Representation, TypeKey, UmlType},
};

use crate::{config::StyleConfig, configuration::ShapeCategory, mapper::MappingError};

/// Dispatches mapping of nested elements back through the registry.
///
/// Implemented by [`RepresentationRegistry`](crate::registry::RepresentationRegistry)
/// so container mappers can compose the graphical elements of their children
/// without knowing which mapper handles them.
pub trait ElementMapping: Send + Sync {
    /// Returns the shape category registered for `uml_type`, if any.
    fn category(&self, uml_type: UmlType) -> Option<ShapeCategory>;

    /// Maps one element with its registered mapper.
    fn map_element(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError>;
}

/// Read-only state shared by the bindings during one request.
#[derive(Clone, Copy)]
pub struct ProviderContext<'a> {
    representation: Representation,
    model: &'a Model,
    style: StyleConfig,
    strict: bool,
    mapping: Option<&'a dyn ElementMapping>,
}

impl<'a> ProviderContext<'a> {
    pub fn new(representation: Representation, model: &'a Model) -> Self {
        Self {
            representation,
            model,
            style: StyleConfig::default(),
            strict: false,
            mapping: None,
        }
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Makes child mapping failures abort instead of being skipped.
    pub fn with_strict_mapping(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_mapping(mut self, mapping: &'a dyn ElementMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The type key of `uml_type` in this context's representation.
    pub fn type_key(&self, uml_type: UmlType) -> TypeKey {
        TypeKey::new(self.representation, uml_type)
    }

    /// Maps the node-category children of `element`, in containment order.
    ///
    /// Children without a binding in this representation are left out, as
    /// are edges, which the graph root collects instead. A child that fails
    /// to map is skipped with a warning unless the context is strict.
    ///
    /// # Errors
    ///
    /// Returns the first child mapping error in strict mode.
    pub fn map_children(&self, element: &Element) -> Result<Vec<GModelElement>, MappingError> {
        let Some(mapping) = self.mapping else {
            return Ok(Vec::new());
        };

        let mut children = Vec::new();
        for child in self.model.children(element.id()) {
            if mapping.category(child.uml_type()) != Some(ShapeCategory::Node) {
                trace!(id:% = child.id(), uml_type:% = child.uml_type(); "No node binding for child");
                continue;
            }
            match mapping.map_element(self, child) {
                Ok(mapped) => children.push(mapped),
                Err(err) if self.strict => return Err(err),
                Err(err) => warn!(id:% = child.id(), err:% = err; "Skipping unmappable child"),
            }
        }
        Ok(children)
    }
}

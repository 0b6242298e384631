//! Generalization bindings.

use stencil_core::{
    gmodel::{GModelElement, css::Marker},
    semantic::{Element, Model},
    uml::UmlType,
};

use crate::{
    configuration::EdgeConfiguration,
    context::ProviderContext,
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateEdgeArgument, EdgeOperationHandler},
    property::{ElementPropertyBuilder, PropertyItem, PropertyProvider, PropertySetters},
    registry::RegistryError,
};

pub const IS_SUBSTITUTABLE: &str = "isSubstitutable";

/// Draws a generalization from the specific to the general classifier with
/// a hollow triangle at the general end. It has no nested elements.
#[derive(Debug, Default)]
pub struct GeneralizationMapper;

impl GModelMapper for GeneralizationMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::Generalization)?;
        Ok(mapper::edge_builder(ctx, element)?
            .css_class(Marker::TriangleEmpty.end())
            .build())
    }
}

/// Exposes `isSubstitutable` of a generalization.
#[derive(Debug)]
pub struct GeneralizationPropertyProvider {
    setters: PropertySetters,
}

impl GeneralizationPropertyProvider {
    pub fn new() -> Self {
        Self {
            setters: PropertySetters::new()
                .with_bool(IS_SUBSTITUTABLE, Element::set_substitutable),
        }
    }
}

impl Default for GeneralizationPropertyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyProvider for GeneralizationPropertyProvider {
    fn provide(&self, _ctx: &ProviderContext<'_>, element: &Element) -> Vec<PropertyItem> {
        let Some(is_substitutable) = element.is_substitutable() else {
            return Vec::new();
        };
        ElementPropertyBuilder::new(element.id())
            .bool(IS_SUBSTITUTABLE, "Is Substitutable", is_substitutable)
            .items()
    }

    fn setters(&self) -> &PropertySetters {
        &self.setters
    }
}

/// Returns true if `specific` may specialize `general`.
///
/// A classifier may only specialize a classifier of a metaclass it conforms
/// to, and never itself.
pub fn may_specialize_type(specific: &Element, general: &Element) -> bool {
    specific.id() != general.id() && specific.uml_type().conforms_to(general.uml_type())
}

#[derive(Debug, Default)]
pub struct GeneralizationManifest;

impl ElementManifest for GeneralizationManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Generalization
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Generalization);
        let ends = [UmlType::Classifier];
        binder.bind_mapper(UmlType::Generalization, GeneralizationMapper)?;
        binder.bind_configuration(EdgeConfiguration::new(key, &ends, &ends))?;
        binder.bind_create_handler(EdgeOperationHandler::new(
            key,
            CreateEdgeArgument::new(&ends, &ends, Model::create_generalization)
                .with_validator(may_specialize_type),
        ))?;
        binder.bind_property_provider(
            UmlType::Generalization,
            GeneralizationPropertyProvider::new(),
        );
        Ok(())
    }
}

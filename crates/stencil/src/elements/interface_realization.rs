//! InterfaceRealization bindings.

use stencil_core::{
    gmodel::{GModelElement, css},
    semantic::{Element, Model},
    uml::UmlType,
};

use crate::{
    configuration::EdgeConfiguration,
    context::ProviderContext,
    elements::named_element::NamedElementPropertyProvider,
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateEdgeArgument, EdgeOperationHandler},
    registry::RegistryError,
};

/// Draws an interface realization from the implementing classifier to the
/// contract: dashed, hollow triangle at the contract, no nested elements.
#[derive(Debug, Default)]
pub struct InterfaceRealizationMapper;

impl GModelMapper for InterfaceRealizationMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::InterfaceRealization)?;
        Ok(mapper::edge_builder(ctx, element)?
            .css_class(css::EDGE_DASHED)
            .css_class(css::Marker::TriangleEmpty.end())
            .build())
    }
}

#[derive(Debug, Default)]
pub struct InterfaceRealizationManifest;

impl ElementManifest for InterfaceRealizationManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::InterfaceRealization
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::InterfaceRealization);
        let sources = [UmlType::BehavioredClassifier];
        let targets = [UmlType::Interface];
        binder.bind_mapper(UmlType::InterfaceRealization, InterfaceRealizationMapper)?;
        binder.bind_configuration(EdgeConfiguration::new(key, &sources, &targets))?;
        binder.bind_create_handler(EdgeOperationHandler::new(
            key,
            CreateEdgeArgument::new(&sources, &targets, Model::create_interface_realization),
        ))?;
        binder.bind_property_provider(
            UmlType::InterfaceRealization,
            NamedElementPropertyProvider::new(),
        );
        Ok(())
    }
}

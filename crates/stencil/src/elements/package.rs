//! Package bindings.

use stencil_core::{
    gmodel::GModelElement,
    semantic::{Element, ElementKind},
    uml::UmlType,
};

use crate::{
    configuration::NodeConfiguration,
    context::ProviderContext,
    elements::named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateNodeArgument, NodeOperationHandler},
    registry::RegistryError,
};

/// Draws a package as a node with a name header and a compartment of its
/// packaged elements.
#[derive(Debug, Default)]
pub struct PackageMapper;

impl GModelMapper for PackageMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::Package)?;
        let children = ctx.map_children(element)?;
        Ok(mapper::node_builder(ctx, element)
            .child(mapper::header(element, None))
            .child(mapper::compartment(element, "packagedElements", children))
            .build())
    }
}

#[derive(Debug, Default)]
pub struct PackageManifest;

impl ElementManifest for PackageManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Package
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Package);
        binder.bind_mapper(UmlType::Package, PackageMapper)?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .containable(&[UmlType::Package, UmlType::Classifier]),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(package, ElementKind::Package, Some(name))
            }),
        ))?;
        binder.bind_label_edit(UmlType::Package, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Package, NamedElementPropertyProvider::new());
        Ok(())
    }
}

//! Interaction bindings.

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

/// Draws an interaction as a frame holding its lifelines.
#[derive(Debug, Default)]
pub struct InteractionMapper;

impl GModelMapper for InteractionMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::Interaction)?;
        let lifelines = ctx.map_children(element)?;
        Ok(mapper::node_builder(ctx, element)
            .child(mapper::header(element, None))
            .child(mapper::compartment(element, "lifelines", lifelines))
            .build())
    }
}

#[derive(Debug, Default)]
pub struct InteractionManifest;

impl ElementManifest for InteractionManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Interaction
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Interaction);
        binder.bind_mapper(UmlType::Interaction, InteractionMapper)?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .containable(&[UmlType::Lifeline]),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(package, ElementKind::Interaction, Some(name))
            }),
        ))?;
        binder.bind_label_edit(UmlType::Interaction, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Interaction, NamedElementPropertyProvider::new());
        Ok(())
    }
}

//! Actor bindings.

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

/// Draws an actor as a stick figure node captioned with its name.
#[derive(Debug, Default)]
pub struct ActorMapper;

impl GModelMapper for ActorMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::Actor)?;
        Ok(mapper::node_builder(ctx, element)
            .css_class("uml-actor")
            .child(mapper::name_label(element))
            .build())
    }
}

#[derive(Debug, Default)]
pub struct ActorManifest;

impl ElementManifest for ActorManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Actor
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Actor);
        binder.bind_mapper(UmlType::Actor, ActorMapper)?;
        binder.bind_configuration(NodeConfiguration::new(key).graph_containable())?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(package, ElementKind::Actor, Some(name))
            }),
        ))?;
        binder.bind_label_edit(UmlType::Actor, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Actor, NamedElementPropertyProvider::new());
        Ok(())
    }
}

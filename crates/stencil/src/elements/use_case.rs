//! UseCase bindings.

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

#[derive(Debug, Default)]
pub struct UseCaseMapper;

impl GModelMapper for UseCaseMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::UseCase)?;
        Ok(mapper::node_builder(ctx, element)
            .css_class("uml-use-case")
            .child(mapper::header(element, None))
            .build())
    }
}

#[derive(Debug, Default)]
pub struct UseCaseManifest;

impl ElementManifest for UseCaseManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::UseCase
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::UseCase);
        binder.bind_mapper(UmlType::UseCase, UseCaseMapper)?;
        binder.bind_configuration(NodeConfiguration::new(key).graph_containable())?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(package, ElementKind::UseCase, Some(name))
            }),
        ))?;
        binder.bind_label_edit(UmlType::UseCase, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::UseCase, NamedElementPropertyProvider::new());
        Ok(())
    }
}

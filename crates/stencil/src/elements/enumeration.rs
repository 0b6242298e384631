//! Enumeration and EnumerationLiteral bindings.

use stencil_core::{
    gmodel::{GModelBuilder, GModelElement},
    semantic::{Element, ElementKind},
    uml::UmlType,
};

use crate::{
    configuration::NodeConfiguration,
    context::ProviderContext,
    elements::{
        classifier::ClassifierMapper,
        named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    },
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateNodeArgument, NodeOperationHandler},
    registry::RegistryError,
};

#[derive(Debug, Default)]
pub struct EnumerationManifest;

impl ElementManifest for EnumerationManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Enumeration
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Enumeration);
        binder.bind_mapper(
            UmlType::Enumeration,
            ClassifierMapper::new(UmlType::Enumeration)
                .with_keyword("enumeration")
                .with_compartment("literals"),
        )?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .containable(&[UmlType::EnumerationLiteral]),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(package, ElementKind::Enumeration, Some(name))
            }),
        ))?;
        binder.bind_label_edit(UmlType::Enumeration, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Enumeration, NamedElementPropertyProvider::new());
        Ok(())
    }
}

/// Draws a literal as a single text row inside the literals compartment.
#[derive(Debug, Default)]
pub struct EnumerationLiteralMapper;

impl GModelMapper for EnumerationLiteralMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::EnumerationLiteral)?;
        Ok(GModelBuilder::label(
            element.id(),
            ctx.type_key(UmlType::EnumerationLiteral).id(),
            element.label(),
        )
        .build())
    }
}

#[derive(Debug, Default)]
pub struct EnumerationLiteralManifest;

impl ElementManifest for EnumerationLiteralManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::EnumerationLiteral
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::EnumerationLiteral);
        binder.bind_mapper(UmlType::EnumerationLiteral, EnumerationLiteralMapper)?;
        binder.bind_configuration(NodeConfiguration::new(key).with_flags(false, true, false, true))?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Enumeration], |model, enumeration, name| {
                model.create_owned_literal(enumeration, name)
            }),
        ))?;
        binder.bind_label_edit(UmlType::EnumerationLiteral, NamedElementLabelEditHandler);
        binder.bind_property_provider(
            UmlType::EnumerationLiteral,
            NamedElementPropertyProvider::new(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{semantic::Model, uml::Representation};

    use crate::operation::{CreateOperation, OperationHandler};

    #[test]
    fn test_literal_handler_requires_enumeration() {
        let mut model = Model::new("m");
        let root = model.root();
        let color = model
            .create(root, Some("Color"), ElementKind::Enumeration)
            .unwrap();

        let key = ElementBinder::new(Representation::Class).type_key(UmlType::EnumerationLiteral);
        let handler = NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Enumeration], |model, enumeration, name| {
                model.create_owned_literal(enumeration, name)
            }),
        );

        let ctx = ProviderContext::new(Representation::Class, &model);
        assert!(!handler.can_create(&ctx, &CreateOperation::node(key, None)));

        let op = CreateOperation::node(key, Some(color)).with_name("RED");
        let mut command = handler.handle(&ctx, &op).unwrap();
        command.execute(&mut model).unwrap();

        let literals: Vec<_> = model.children(color).map(|e| e.label()).collect();
        assert_eq!(literals, vec!["RED"]);
    }

    #[test]
    fn test_literal_maps_to_label() {
        let mut model = Model::new("m");
        let root = model.root();
        let color = model
            .create(root, Some("Color"), ElementKind::Enumeration)
            .unwrap();
        let red = model.create_owned_literal(color, "RED").unwrap();

        let ctx = ProviderContext::new(Representation::Class, &model);
        let mapped = EnumerationLiteralMapper
            .map(&ctx, model.element(red).unwrap())
            .unwrap();
        assert_eq!(mapped.text(), Some("RED"));
        assert_eq!(mapped.element_type(), "class__EnumerationLiteral");
    }
}

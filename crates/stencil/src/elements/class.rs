//! Class bindings.

use stencil_core::{
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
    operation::{CreateNodeArgument, NodeOperationHandler},
    property::{ElementPropertyBuilder, PropertyItem, PropertyProvider, PropertySetters},
    registry::RegistryError,
};

pub const IS_ABSTRACT: &str = "isAbstract";

/// Exposes `isAbstract` of a class.
#[derive(Debug)]
pub struct ClassPropertyProvider {
    setters: PropertySetters,
}

impl ClassPropertyProvider {
    pub fn new() -> Self {
        Self {
            setters: PropertySetters::new().with_bool(IS_ABSTRACT, Element::set_abstract),
        }
    }
}

impl Default for ClassPropertyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyProvider for ClassPropertyProvider {
    fn provide(&self, _ctx: &ProviderContext<'_>, element: &Element) -> Vec<PropertyItem> {
        let Some(is_abstract) = element.is_abstract() else {
            return Vec::new();
        };
        ElementPropertyBuilder::new(element.id())
            .bool(IS_ABSTRACT, "Is Abstract", is_abstract)
            .items()
    }

    fn setters(&self) -> &PropertySetters {
        &self.setters
    }
}

#[derive(Debug, Default)]
pub struct ClassManifest;

impl ElementManifest for ClassManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Class
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Class);
        binder.bind_mapper(UmlType::Class, ClassifierMapper::new(UmlType::Class))?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .containable(&[UmlType::Property]),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(
                    package,
                    ElementKind::Class { is_abstract: false },
                    Some(name),
                )
            }),
        ))?;
        binder.bind_label_edit(UmlType::Class, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Class, NamedElementPropertyProvider::new());
        binder.bind_property_provider(UmlType::Class, ClassPropertyProvider::new());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{
        gmodel::css,
        semantic::Model,
        uml::Representation,
    };

    use crate::{mapper::GModelMapper, property::PropertyUpdate};

    #[test]
    fn test_abstract_class_is_italic() {
        let mut model = Model::new("m");
        let root = model.root();
        let a = model
            .create(root, Some("Shape"), ElementKind::Class { is_abstract: true })
            .unwrap();

        let ctx = ProviderContext::new(Representation::Class, &model);
        let mapped = ClassifierMapper::new(UmlType::Class)
            .map(&ctx, model.element(a).unwrap())
            .unwrap();
        assert!(mapped.has_css_class(css::FONT_ITALIC));
        assert_eq!(mapped.label_texts(), vec!["Shape"]);
    }

    #[test]
    fn test_is_abstract_property() {
        let mut model = Model::new("m");
        let root = model.root();
        let a = model
            .create(root, Some("A"), ElementKind::Class { is_abstract: false })
            .unwrap();
        let provider = ClassPropertyProvider::new();

        let mut command = {
            let ctx = ProviderContext::new(Representation::Class, &model);
            let element = model.element(a).unwrap();
            let items = provider.provide(&ctx, element);
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].label(), "Is Abstract");
            provider.handle(&ctx, &PropertyUpdate::new(a, IS_ABSTRACT, "true"), element)
        };
        command.execute(&mut model).unwrap();
        assert_eq!(model.element(a).unwrap().is_abstract(), Some(true));
    }
}

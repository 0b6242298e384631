//! Interface bindings.

use stencil_core::{semantic::ElementKind, uml::UmlType};

use crate::{
    configuration::NodeConfiguration,
    elements::{
        classifier::ClassifierMapper,
        named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    },
    manifest::{ElementBinder, ElementManifest},
    operation::{CreateNodeArgument, NodeOperationHandler},
    registry::RegistryError,
};

#[derive(Debug, Default)]
pub struct InterfaceManifest;

impl ElementManifest for InterfaceManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Interface
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Interface);
        binder.bind_mapper(
            UmlType::Interface,
            ClassifierMapper::new(UmlType::Interface).with_keyword("interface"),
        )?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .containable(&[UmlType::Property]),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], |model, package, name| {
                model.create_packaged_element(package, ElementKind::Interface, Some(name))
            }),
        ))?;
        binder.bind_label_edit(UmlType::Interface, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Interface, NamedElementPropertyProvider::new());
        Ok(())
    }
}

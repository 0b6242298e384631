//! DataType and PrimitiveType bindings.

use stencil_core::{
    identifier::Id,
    semantic::{ElementKind, Model, ModelError},
    uml::UmlType,
};

use crate::{
    configuration::NodeConfiguration,
    elements::{
        classifier::ClassifierMapper,
        named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    },
    manifest::{ElementBinder, ElementManifest},
    operation::{CreateNodeArgument, NodeFactory, NodeOperationHandler},
    registry::RegistryError,
};

/// Binds `DataType` or `PrimitiveType`; both render with a keyword header.
#[derive(Debug, Clone, Copy)]
pub struct DataTypeManifest {
    uml_type: UmlType,
}

impl DataTypeManifest {
    pub fn data_type() -> Self {
        Self {
            uml_type: UmlType::DataType,
        }
    }

    pub fn primitive_type() -> Self {
        Self {
            uml_type: UmlType::PrimitiveType,
        }
    }

    fn keyword(self) -> &'static str {
        match self.uml_type {
            UmlType::PrimitiveType => "primitive",
            _ => "dataType",
        }
    }

    fn factory(self) -> NodeFactory {
        match self.uml_type {
            UmlType::PrimitiveType => create_primitive_type,
            _ => create_data_type,
        }
    }
}

fn create_data_type(model: &mut Model, package: Id, name: &str) -> Result<Id, ModelError> {
    model.create_packaged_element(package, ElementKind::DataType, Some(name))
}

fn create_primitive_type(model: &mut Model, package: Id, name: &str) -> Result<Id, ModelError> {
    model.create_packaged_element(package, ElementKind::PrimitiveType, Some(name))
}

impl ElementManifest for DataTypeManifest {
    fn uml_type(&self) -> UmlType {
        self.uml_type
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(self.uml_type);
        binder.bind_mapper(
            self.uml_type,
            ClassifierMapper::new(self.uml_type).with_keyword(self.keyword()),
        )?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .containable(&[UmlType::Property]),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Package], self.factory()),
        ))?;
        binder.bind_label_edit(self.uml_type, NamedElementLabelEditHandler);
        binder.bind_property_provider(self.uml_type, NamedElementPropertyProvider::new());
        Ok(())
    }
}

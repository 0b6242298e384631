//! Dependency family bindings: Dependency, Abstraction, Realization, Usage.

use stencil_core::{
    gmodel::{GModelElement, css},
    identifier::Id,
    semantic::{DependencyKind, Element, Model, ModelError},
    uml::UmlType,
};

use crate::{
    configuration::EdgeConfiguration,
    context::ProviderContext,
    elements::named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateEdgeArgument, EdgeFactory, EdgeOperationHandler},
    registry::RegistryError,
};

/// Draws a dependency-like relationship as a dashed edge from the first
/// client to the first supplier.
///
/// | kind        | end marker     | keyword         |
/// |-------------|----------------|-----------------|
/// | Dependency  | arrow          |                 |
/// | Abstraction | arrow          | `«abstraction»` |
/// | Usage       | arrow          | `«use»`         |
/// | Realization | triangle-empty |                 |
///
/// Named relationships also carry their name label after the keyword.
#[derive(Debug, Clone, Copy)]
pub struct DependencyMapper {
    kind: DependencyKind,
}

impl DependencyMapper {
    pub fn new(kind: DependencyKind) -> Self {
        Self { kind }
    }

    fn keyword(self) -> Option<&'static str> {
        match self.kind {
            DependencyKind::Abstraction => Some("abstraction"),
            DependencyKind::Usage => Some("use"),
            DependencyKind::Dependency | DependencyKind::Realization => None,
        }
    }

    fn marker(self) -> css::Marker {
        match self.kind {
            DependencyKind::Realization => css::Marker::TriangleEmpty,
            _ => css::Marker::Arrow,
        }
    }
}

impl GModelMapper for DependencyMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, self.kind.uml_type())?;
        let mut builder = mapper::edge_builder(ctx, element)?
            .css_class(css::EDGE_DASHED)
            .css_class(self.marker().end());
        if let Some(keyword) = self.keyword() {
            builder = builder.child(mapper::keyword_label(element, keyword));
        }
        if element.name().is_some() {
            builder = builder.child(mapper::name_label(element));
        }
        Ok(builder.build())
    }
}

/// Binds one kind of the dependency family.
#[derive(Debug, Clone, Copy)]
pub struct DependencyManifest {
    kind: DependencyKind,
}

impl DependencyManifest {
    pub fn new(kind: DependencyKind) -> Self {
        Self { kind }
    }

    fn factory(self) -> EdgeFactory {
        match self.kind {
            DependencyKind::Dependency => create_dependency,
            DependencyKind::Abstraction => create_abstraction,
            DependencyKind::Realization => create_realization,
            DependencyKind::Usage => create_usage,
        }
    }
}

fn create_dependency(model: &mut Model, client: Id, supplier: Id) -> Result<Id, ModelError> {
    model.create_dependency(client, supplier, DependencyKind::Dependency)
}

fn create_abstraction(model: &mut Model, client: Id, supplier: Id) -> Result<Id, ModelError> {
    model.create_dependency(client, supplier, DependencyKind::Abstraction)
}

fn create_realization(model: &mut Model, client: Id, supplier: Id) -> Result<Id, ModelError> {
    model.create_dependency(client, supplier, DependencyKind::Realization)
}

fn create_usage(model: &mut Model, client: Id, supplier: Id) -> Result<Id, ModelError> {
    model.create_dependency(client, supplier, DependencyKind::Usage)
}

impl ElementManifest for DependencyManifest {
    fn uml_type(&self) -> UmlType {
        self.kind.uml_type()
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let uml_type = self.kind.uml_type();
        let key = binder.type_key(uml_type);
        let ends = [UmlType::PackageableElement];
        binder.bind_mapper(uml_type, DependencyMapper::new(self.kind))?;
        binder.bind_configuration(EdgeConfiguration::new(key, &ends, &ends))?;
        binder.bind_create_handler(EdgeOperationHandler::new(
            key,
            CreateEdgeArgument::new(&ends, &ends, self.factory()),
        ))?;
        binder.bind_label_edit(uml_type, NamedElementLabelEditHandler);
        binder.bind_property_provider(uml_type, NamedElementPropertyProvider::new());
        Ok(())
    }
}

//! Extend and Include bindings.
//!
//! Both are dashed arrows between use cases labelled with their keyword.
//! Neither exposes properties.

use stencil_core::{
    gmodel::{GModelElement, css},
    semantic::{Element, Model},
    uml::UmlType,
};

use crate::{
    configuration::EdgeConfiguration,
    context::ProviderContext,
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateEdgeArgument, EdgeFactory, EdgeOperationHandler},
    registry::RegistryError,
};

#[derive(Debug, Clone, Copy)]
pub struct UseCaseRelationshipMapper {
    uml_type: UmlType,
    keyword: &'static str,
}

impl UseCaseRelationshipMapper {
    pub fn new(uml_type: UmlType, keyword: &'static str) -> Self {
        Self { uml_type, keyword }
    }
}

impl GModelMapper for UseCaseRelationshipMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, self.uml_type)?;
        Ok(mapper::edge_builder(ctx, element)?
            .css_class(css::EDGE_DASHED)
            .css_class(css::Marker::Arrow.end())
            .child(mapper::keyword_label(element, self.keyword))
            .build())
    }
}

fn configure_relationship(
    binder: &mut ElementBinder,
    uml_type: UmlType,
    keyword: &'static str,
    create: EdgeFactory,
) -> Result<(), RegistryError> {
    let key = binder.type_key(uml_type);
    let ends = [UmlType::UseCase];
    binder.bind_mapper(uml_type, UseCaseRelationshipMapper::new(uml_type, keyword))?;
    binder.bind_configuration(EdgeConfiguration::new(key, &ends, &ends))?;
    binder.bind_create_handler(EdgeOperationHandler::new(
        key,
        CreateEdgeArgument::new(&ends, &ends, create),
    ))
}

/// Extension use case → extended case.
#[derive(Debug, Default)]
pub struct ExtendManifest;

impl ElementManifest for ExtendManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Extend
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        configure_relationship(binder, UmlType::Extend, "extend", Model::create_extend)
    }
}

/// Including use case → addition.
#[derive(Debug, Default)]
pub struct IncludeManifest;

impl ElementManifest for IncludeManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Include
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        configure_relationship(binder, UmlType::Include, "include", Model::create_include)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{semantic::ElementKind, uml::Representation};

    #[test]
    fn test_extend_points_at_extended_case() {
        let mut model = Model::new("m");
        let root = model.root();
        let checkout = model
            .create(root, Some("Checkout"), ElementKind::UseCase)
            .unwrap();
        let coupon = model
            .create(root, Some("Apply coupon"), ElementKind::UseCase)
            .unwrap();
        let extend = model.create_extend(coupon, checkout).unwrap();

        let ctx = ProviderContext::new(Representation::UseCase, &model);
        let mapped = UseCaseRelationshipMapper::new(UmlType::Extend, "extend")
            .map(&ctx, model.element(extend).unwrap())
            .unwrap();
        assert_eq!(mapped.edge_ends(), Some((coupon, checkout)));
        assert_eq!(mapped.label_texts(), vec!["«extend»"]);
    }

    #[test]
    fn test_include_points_at_addition() {
        let mut model = Model::new("m");
        let root = model.root();
        let checkout = model
            .create(root, Some("Checkout"), ElementKind::UseCase)
            .unwrap();
        let login = model.create(root, Some("Login"), ElementKind::UseCase).unwrap();
        let include = model.create_include(checkout, login).unwrap();

        let ctx = ProviderContext::new(Representation::UseCase, &model);
        let mapped = UseCaseRelationshipMapper::new(UmlType::Include, "include")
            .map(&ctx, model.element(include).unwrap())
            .unwrap();
        assert_eq!(mapped.edge_ends(), Some((checkout, login)));
        assert!(mapped.has_css_class(css::EDGE_DASHED));
        assert_eq!(mapped.label_texts(), vec!["«include»"]);
    }
}

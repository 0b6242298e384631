//! Builds the complete graphical model of one representation.

use log::{debug, info, warn};

use stencil_core::{
    gmodel::{GModelBuilder, GModelElement, types},
    semantic::Model,
};

use crate::{
    configuration::ShapeCategory,
    context::ElementMapping,
    mapper::MappingError,
    registry::RepresentationRegistry,
};

/// Renders a semantic model into a graph root.
///
/// The graph holds the nodes of the root's direct children (each mapper
/// nesting its own children) followed by one edge per relationship found
/// anywhere in the containment tree, in containment order.
pub struct GModelFactory<'a> {
    registry: &'a RepresentationRegistry,
}

impl<'a> GModelFactory<'a> {
    pub fn new(registry: &'a RepresentationRegistry) -> Self {
        Self { registry }
    }

    /// Maps `model` into a fresh graph.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first element that fails to map.
    /// Otherwise failing elements are skipped with a warning.
    pub fn create_root(&self, model: &Model) -> Result<GModelElement, MappingError> {
        let ctx = self.registry.context(model);
        let root = model.element(model.root())?;
        let representation = self.registry.representation();

        let nodes = ctx.map_children(root)?;
        let mut edges = Vec::new();
        for id in model.descendants(root.id()) {
            let element = model.element(id)?;
            if self.registry.category(element.uml_type()) != Some(ShapeCategory::Edge) {
                continue;
            }
            match self.registry.map_element(&ctx, element) {
                Ok(edge) => edges.push(edge),
                Err(err) if ctx.is_strict() => return Err(err),
                Err(err) => warn!(id:% = id, err:% = err; "Skipping unmappable relationship"),
            }
        }
        debug!(nodes = nodes.len(), edges = edges.len(); "Graph children mapped");

        let graph = GModelBuilder::graph(root.id(), types::GRAPH.into())
            .arg("representation", representation.as_str())
            .children(nodes)
            .children(edges)
            .build();
        info!(
            representation:% = representation,
            elements = graph.iter().count();
            "Graphical model created"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{
        identifier::Id,
        semantic::{DependencyEnds, ElementKind},
        uml::Representation,
    };

    use crate::representations;

    fn registry(representation: Representation, strict: bool) -> RepresentationRegistry {
        RepresentationRegistry::build(representation, &representations::manifests(representation))
            .unwrap()
            .with_options(Default::default(), strict)
    }

    fn class_model() -> (Model, Id, Id, Id) {
        let mut model = Model::new("shop");
        let root = model.root();
        let a = model
            .create(root, Some("ClassA"), ElementKind::Class { is_abstract: false })
            .unwrap();
        let b = model
            .create(root, Some("ClassB"), ElementKind::Class { is_abstract: false })
            .unwrap();
        let g = model.create_generalization(a, b).unwrap();
        (model, a, b, g)
    }

    #[test]
    fn test_nodes_before_edges() {
        let (model, a, b, g) = class_model();
        let registry = registry(Representation::Class, false);

        let graph = GModelFactory::new(&registry).create_root(&model).unwrap();
        let ids: Vec<Id> = graph.children().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![a, b, g]);
        assert_eq!(graph.element_type(), types::GRAPH);
    }

    #[test]
    fn test_broken_edge_skipped_unless_strict() {
        let (mut model, a, _, _) = class_model();
        let root = model.root();
        model
            .create(
                root,
                None,
                ElementKind::Usage(DependencyEnds::new(vec![a], Vec::new())),
            )
            .unwrap();

        let lenient = registry(Representation::Class, false);
        let graph = GModelFactory::new(&lenient).create_root(&model).unwrap();
        assert_eq!(graph.children().iter().filter(|c| c.is_edge()).count(), 1);

        let strict = registry(Representation::Class, true);
        let err = GModelFactory::new(&strict).create_root(&model).unwrap_err();
        assert!(matches!(err, MappingError::MissingEndpoint { .. }));
    }

    #[test]
    fn test_unbound_elements_are_left_out() {
        let (model, ..) = class_model();
        let registry = registry(Representation::Sequence, false);

        let graph = GModelFactory::new(&registry).create_root(&model).unwrap();
        assert!(graph.children().is_empty());
    }
}

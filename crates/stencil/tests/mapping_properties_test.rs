//! Property tests over randomly generated class models.

use proptest::prelude::*;

use stencil::{
    identifier::Id,
    operation::CreateOperation,
    registry::RepresentationRegistry,
    representations,
    semantic::{DependencyKind, ElementKind, Model},
    uml::{Representation, TypeKey, UmlType},
};

// ===================
// Strategies
// ===================

#[derive(Debug, Clone)]
struct Blueprint {
    kinds: Vec<u8>,
    attributes: Vec<usize>,
    generalizations: Vec<(usize, usize)>,
    usages: Vec<(usize, usize)>,
}

fn blueprint_strategy() -> impl Strategy<Value = Blueprint> {
    (1usize..8).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..4, n),
            prop::collection::vec(0..n, 0..6),
            prop::collection::vec((0..n, 0..n), 0..6),
            prop::collection::vec((0..n, 0..n), 0..6),
        )
            .prop_map(|(kinds, attributes, generalizations, usages)| Blueprint {
                kinds,
                attributes,
                generalizations,
                usages,
            })
    })
}

fn build(blueprint: &Blueprint) -> (Model, Vec<Id>) {
    let mut model = Model::new("generated");
    let root = model.root();
    let mut ids = Vec::new();
    for (i, kind) in blueprint.kinds.iter().enumerate() {
        let kind = match kind {
            0 => ElementKind::Class { is_abstract: false },
            1 => ElementKind::Class { is_abstract: true },
            2 => ElementKind::Interface,
            _ => ElementKind::Package,
        };
        let name = format!("E{i}");
        ids.push(model.create(root, Some(&name), kind).unwrap());
    }
    for owner in &blueprint.attributes {
        // Packages decline attributes, which is fine here.
        let _ = model.create_owned_attribute(ids[*owner], "attr");
    }
    for (specific, general) in &blueprint.generalizations {
        let _ = model.create_generalization(ids[*specific], ids[*general]);
    }
    for (client, supplier) in &blueprint.usages {
        let _ = model.create_dependency(ids[*client], ids[*supplier], DependencyKind::Usage);
    }
    (model, ids)
}

fn class_registry() -> RepresentationRegistry {
    RepresentationRegistry::build(
        Representation::Class,
        &representations::manifests(Representation::Class),
    )
    .unwrap()
}

// ===================
// Property Test Functions
// ===================

/// Rendering the same model twice yields identical graphs.
fn check_render_is_deterministic(blueprint: Blueprint) -> Result<(), TestCaseError> {
    let (model, _) = build(&blueprint);
    let registry = class_registry();
    let factory = stencil::gmodel_factory::GModelFactory::new(&registry);

    let first = factory.create_root(&model).unwrap();
    let second = factory.create_root(&model).unwrap();
    prop_assert_eq!(first, second);
    Ok(())
}

/// Every relationship is drawn as exactly one edge between its own ends.
fn check_edges_keep_endpoints(blueprint: Blueprint) -> Result<(), TestCaseError> {
    let (model, _) = build(&blueprint);
    let registry = class_registry();
    let graph = stencil::gmodel_factory::GModelFactory::new(&registry)
        .create_root(&model)
        .unwrap();

    let relationships: Vec<_> = model.elements().filter(|e| e.is_relationship()).collect();
    let edges: Vec<_> = graph.children().iter().filter(|c| c.is_edge()).collect();
    prop_assert_eq!(relationships.len(), edges.len());

    for relationship in relationships {
        let edge = graph.find(relationship.id());
        prop_assert!(edge.is_some());
        let ends = edge.and_then(|edge| edge.edge_ends());
        prop_assert_eq!(
            ends,
            relationship
                .source_ref()
                .zip(relationship.target_ref())
        );
    }
    Ok(())
}

/// Property items come back in the same order with one item per key.
fn check_properties_are_stable(blueprint: Blueprint) -> Result<(), TestCaseError> {
    let (model, _) = build(&blueprint);
    let registry = class_registry();

    for element in model.elements() {
        let first = registry.provide_properties(&model, element.id()).unwrap();
        let second = registry.provide_properties(&model, element.id()).unwrap();
        prop_assert_eq!(&first, &second);

        let mut keys: Vec<_> = first.iter().map(|item| item.property_id()).collect();
        let count = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), count);
    }
    Ok(())
}

/// A declined create never yields a command, and an accepted one does.
fn check_create_follows_can_create(
    blueprint: Blueprint,
    source: usize,
    target: usize,
    edge_type: UmlType,
) -> Result<(), TestCaseError> {
    let (model, ids) = build(&blueprint);
    let registry = class_registry();
    let source = ids[source % ids.len()];
    let target = ids[target % ids.len()];
    let op = CreateOperation::edge(TypeKey::new(Representation::Class, edge_type), source, target);

    let can_create = registry.can_create(&model, &op);
    prop_assert_eq!(can_create, registry.create(&model, &op).is_some());
    Ok(())
}

fn edge_type_strategy() -> impl Strategy<Value = UmlType> {
    prop::sample::select(vec![
        UmlType::Generalization,
        UmlType::Usage,
        UmlType::Abstraction,
        UmlType::InterfaceRealization,
        UmlType::Extend,
    ])
}

proptest! {
    #[test]
    fn render_is_deterministic(blueprint in blueprint_strategy()) {
        check_render_is_deterministic(blueprint)?;
    }

    #[test]
    fn edges_keep_endpoints(blueprint in blueprint_strategy()) {
        check_edges_keep_endpoints(blueprint)?;
    }

    #[test]
    fn properties_are_stable(blueprint in blueprint_strategy()) {
        check_properties_are_stable(blueprint)?;
    }

    #[test]
    fn create_follows_can_create(
        blueprint in blueprint_strategy(),
        source in 0usize..16,
        target in 0usize..16,
        edge_type in edge_type_strategy(),
    ) {
        check_create_follows_can_create(blueprint, source, target, edge_type)?;
    }
}

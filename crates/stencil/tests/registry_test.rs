//! Integration tests for registry construction and request dispatch.

use stencil::{
    configuration::ShapeCategory,
    elements::{ClassManifest, GeneralizationManifest, LifelineManifest},
    manifest::{ElementBinder, ElementManifest},
    operation::CreateOperation,
    property::{PropertyUpdate, PropertyValue},
    registry::{Registry, RegistryError, RepresentationRegistry},
    representations,
    semantic::{ElementKind, Model},
    uml::{Representation, TypeKey, UmlType},
};

fn registry(representation: Representation) -> RepresentationRegistry {
    RepresentationRegistry::build(representation, &representations::manifests(representation))
        .expect("bindings should be consistent")
}

fn key(representation: Representation, uml_type: UmlType) -> TypeKey {
    TypeKey::new(representation, uml_type)
}

fn two_classes() -> (Model, stencil::identifier::Id, stencil::identifier::Id) {
    let mut model = Model::new("m");
    let root = model.root();
    let a = model
        .create(root, Some("ClassA"), ElementKind::Class { is_abstract: false })
        .unwrap();
    let b = model
        .create(root, Some("ClassB"), ElementKind::Class { is_abstract: false })
        .unwrap();
    (model, a, b)
}

#[test]
fn test_every_representation_builds() {
    for representation in Representation::ALL {
        let registry = registry(*representation);
        assert!(registry.type_keys().count() > 0);
        assert!(
            registry
                .type_keys()
                .all(|key| key.representation() == *representation)
        );
    }
}

#[test]
fn test_duplicate_configuration_is_fatal() {
    let manifests: Vec<Box<dyn ElementManifest>> = vec![Box::new(ClassManifest), Box::new(ClassManifest)];
    let err = RepresentationRegistry::build(Representation::Class, &manifests)
        .err()
        .expect("duplicate bindings must fail");
    assert_eq!(err, RegistryError::DuplicateBinding {
        type_key: key(Representation::Class, UmlType::Class),
        binding: "mapper",
    });
}

struct ConfigurationOnly;

impl ElementManifest for ConfigurationOnly {
    fn uml_type(&self) -> UmlType {
        UmlType::Class
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Class);
        binder.bind_configuration(stencil::configuration::NodeConfiguration::new(key))
    }
}

#[test]
fn test_incomplete_binding_is_fatal() {
    let manifests: Vec<Box<dyn ElementManifest>> = vec![Box::new(ConfigurationOnly)];
    let err = RepresentationRegistry::build(Representation::Class, &manifests)
        .err()
        .expect("missing mapper must fail");
    assert!(matches!(err, RegistryError::IncompleteBinding {
        binding: "mapper",
        ..
    }));
}

#[test]
fn test_duplicate_representation() {
    let mut registry = Registry::new();
    registry
        .register(self::registry(Representation::Sequence))
        .unwrap();
    let err = registry
        .register(self::registry(Representation::Sequence))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateRepresentation(Representation::Sequence)
    );
    assert!(registry.get(Representation::Class).is_err());
}

#[test]
fn test_type_mappings() {
    let registry = registry(Representation::Class);
    let mappings = registry.type_mappings();
    assert_eq!(
        mappings.get(&key(Representation::Class, UmlType::InterfaceRealization)),
        Some(&ShapeCategory::Edge)
    );
    assert_eq!(
        mappings.get(&key(Representation::Class, UmlType::Property)),
        Some(&ShapeCategory::Node)
    );
    assert!(!mappings.contains_key(&key(Representation::Class, UmlType::Lifeline)));
}

#[test]
fn test_lifeline_shape_hint() {
    let registry = registry(Representation::Sequence);
    let lifeline = key(Representation::Sequence, UmlType::Lifeline);

    let hints = registry.shape_type_hints();
    let hint = hints
        .iter()
        .find(|hint| hint.element_type_id() == lifeline)
        .expect("lifeline hint");
    assert!(hint.repositionable());
    assert!(hint.deletable());
    assert!(hint.resizable());
    assert!(!hint.reparentable());
    assert!(hint.containable_element_type_ids().is_empty());
    assert!(registry.graph_containable_elements().contains(&lifeline));
}

#[test]
fn test_containable_ids_are_filtered_to_registered() {
    let registry = registry(Representation::Package);
    let hints = registry.shape_type_hints();
    let class = hints
        .iter()
        .find(|hint| hint.element_type_id() == key(Representation::Package, UmlType::Class))
        .unwrap();
    assert!(class.containable_element_type_ids().is_empty());

    let package = hints
        .iter()
        .find(|hint| hint.element_type_id() == key(Representation::Package, UmlType::Package))
        .unwrap();
    assert_eq!(package.containable_element_type_ids(), [
        key(Representation::Package, UmlType::Package),
        key(Representation::Package, UmlType::Class),
        key(Representation::Package, UmlType::Interface),
    ]);
}

#[test]
fn test_interface_realization_edge_hint() {
    let registry = registry(Representation::Class);
    let hints = registry.edge_type_hints();
    let hint = hints
        .iter()
        .find(|hint| hint.element_type_id() == key(Representation::Class, UmlType::InterfaceRealization))
        .unwrap();
    assert!(!hint.repositionable());
    assert!(hint.deletable());
    assert!(hint.routable());
    assert_eq!(hint.source_element_type_ids(), [key(
        Representation::Class,
        UmlType::Class
    )]);
    assert_eq!(hint.target_element_type_ids(), [key(
        Representation::Class,
        UmlType::Interface
    )]);
}

#[test]
fn test_create_generalization_and_undo() {
    let (mut model, a, b) = two_classes();
    let registry = registry(Representation::Class);
    let op = CreateOperation::edge(key(Representation::Class, UmlType::Generalization), a, b);
    let before = model.clone();

    assert!(registry.can_create(&model, &op));
    let mut command = registry.create(&model, &op).expect("applicable");
    command.execute(&mut model).unwrap();

    let generalizations: Vec<_> = model
        .elements()
        .filter(|e| e.uml_type() == UmlType::Generalization)
        .collect();
    assert_eq!(generalizations.len(), 1);
    assert_eq!(generalizations[0].source_ref(), Some(a));
    assert_eq!(generalizations[0].target_ref(), Some(b));

    command.undo(&mut model).unwrap();
    assert_eq!(model, before);
    command.redo(&mut model).unwrap();
    assert_eq!(model.len(), before.len() + 1);
}

#[test]
fn test_create_declines_without_error() {
    let mut model = Model::new("m");
    let root = model.root();
    let interface = model.create(root, Some("I"), ElementKind::Interface).unwrap();
    let data_type = model.create(root, Some("D"), ElementKind::DataType).unwrap();
    let registry = registry(Representation::Class);

    let op = CreateOperation::edge(
        key(Representation::Class, UmlType::Generalization),
        interface,
        data_type,
    );
    assert!(!registry.can_create(&model, &op));
    assert!(registry.create(&model, &op).is_none());

    let unbound = CreateOperation::edge(key(Representation::Class, UmlType::Extend), interface, data_type);
    assert!(registry.create(&model, &unbound).is_none());
}

#[test]
fn test_create_node_with_default_name() {
    let mut model = Model::new("m");
    let registry = registry(Representation::UseCase);
    let op = CreateOperation::node(key(Representation::UseCase, UmlType::Actor), None);

    let mut command = registry.create(&model, &op).unwrap();
    command.execute(&mut model).unwrap();

    let actors: Vec<_> = model.children(model.root()).collect();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].name(), Some("NewActor"));
}

#[test]
fn test_lifeline_requires_interaction() {
    let mut model = Model::new("m");
    let root = model.root();
    let interaction = model
        .create(root, Some("Login"), ElementKind::Interaction)
        .unwrap();
    let registry = registry(Representation::Sequence);
    let lifeline = key(Representation::Sequence, UmlType::Lifeline);

    assert!(!registry.can_create(&model, &CreateOperation::node(lifeline, None)));
    let op = CreateOperation::node(lifeline, Some(interaction)).with_name("user");
    let mut command = registry.create(&model, &op).unwrap();
    command.execute(&mut model).unwrap();
    assert_eq!(model.children(interaction).count(), 1);
}

#[test]
fn test_provide_properties_in_binding_order() {
    let (mut model, a, _) = two_classes();
    let attribute = model.create_owned_attribute(a, "size").unwrap();
    let registry = registry(Representation::Class);

    let ids = |id| -> Vec<String> {
        registry
            .provide_properties(&model, id)
            .unwrap()
            .iter()
            .map(|item| item.property_id().to_string())
            .collect()
    };
    assert_eq!(ids(a), vec!["name", "visibility", "isAbstract"]);
    assert_eq!(ids(attribute), vec!["name", "visibility", "isReadOnly"]);
    assert_eq!(ids(model.root()), Vec::<String>::new());
}

#[test]
fn test_update_read_only_through_registry() {
    let (mut model, a, _) = two_classes();
    let attribute = model.create_owned_attribute(a, "size").unwrap();
    let registry = registry(Representation::Class);

    let mut command = registry
        .update_property(&model, &PropertyUpdate::new(attribute, "isReadOnly", "false"))
        .unwrap();
    command.execute(&mut model).unwrap();
    let items = registry.provide_properties(&model, attribute).unwrap();
    assert_eq!(items[2].value(), &PropertyValue::Bool { value: false });

    let mut command = registry
        .update_property(&model, &PropertyUpdate::new(attribute, "isReadOnly", "true"))
        .unwrap();
    command.execute(&mut model).unwrap();
    let items = registry.provide_properties(&model, attribute).unwrap();
    assert_eq!(items[2].value(), &PropertyValue::Bool { value: true });
}

#[test]
fn test_unknown_property_is_noop() {
    let (mut model, a, _) = two_classes();
    let registry = registry(Representation::Class);
    let before = model.clone();

    let mut command = registry
        .update_property(&model, &PropertyUpdate::new(a, "isLeaf", "true"))
        .unwrap();
    assert!(command.is_noop());
    command.execute(&mut model).unwrap();
    assert_eq!(model, before);
}

#[test]
fn test_edit_label() {
    let (mut model, a, _) = two_classes();
    let registry = registry(Representation::Class);

    let err = registry.edit_label(&model, a, "   ").err().unwrap();
    assert!(matches!(err, RegistryError::InvalidLabel { .. }));

    let mut command = registry.edit_label(&model, a, "Invoice").unwrap().unwrap();
    command.execute(&mut model).unwrap();
    assert_eq!(model.element(a).unwrap().name(), Some("Invoice"));
}

#[test]
fn test_generalization_has_no_label_edit() {
    let (mut model, a, b) = two_classes();
    let g = model.create_generalization(a, b).unwrap();
    let manifests: Vec<Box<dyn ElementManifest>> = vec![
        Box::new(ClassManifest),
        Box::new(GeneralizationManifest),
        Box::new(LifelineManifest),
    ];
    let registry = RepresentationRegistry::build(Representation::Class, &manifests).unwrap();

    assert!(registry.edit_label(&model, g, "x").unwrap().is_none());
    assert!(registry.map(&model, g).is_ok());
}

//! Integration tests for the DiagramBuilder API
//!
//! These tests load JSON model documents and render them through the full
//! registry of every representation.

use stencil::{
    DiagramBuilder, StencilError,
    config::{AppConfig, DiagramConfig, StyleConfig},
    gmodel::GModelElement,
    identifier::Id,
    registry::RegistryError,
    semantic::ModelError,
    uml::Representation,
};

const SHOP: &str = r#"{
    "root": "shop",
    "elements": [
        {"id": "shop", "name": "shop", "type": "Model",
         "owned": ["Order", "Shape", "Api", "Money", "Color", "Order_uses_Api"]},
        {"id": "Order", "owner": "shop", "name": "Order", "type": "Class",
         "owned": ["Order_total", "Order_extends_Shape", "Order_realizes_Api"]},
        {"id": "Order_total", "owner": "Order", "name": "total", "type": "Property",
         "isReadOnly": true, "typeId": "Money"},
        {"id": "Order_extends_Shape", "owner": "Order", "type": "Generalization", "general": "Shape"},
        {"id": "Order_realizes_Api", "owner": "Order", "type": "InterfaceRealization",
         "implementingClassifier": "Order", "contract": "Api"},
        {"id": "Shape", "owner": "shop", "name": "Shape", "type": "Class", "isAbstract": true},
        {"id": "Api", "owner": "shop", "name": "Api", "type": "Interface"},
        {"id": "Money", "owner": "shop", "name": "Money", "type": "DataType"},
        {"id": "Color", "owner": "shop", "name": "Color", "type": "Enumeration",
         "owned": ["Color_red"]},
        {"id": "Color_red", "owner": "Color", "name": "RED", "type": "EnumerationLiteral"},
        {"id": "Order_uses_Api", "owner": "shop", "type": "Usage",
         "clients": ["Order"], "suppliers": ["Api"]}
    ]
}"#;

fn child<'a>(graph: &'a GModelElement, id: &str) -> &'a GModelElement {
    graph
        .find(Id::new(id))
        .unwrap_or_else(|| panic!("missing graphical element `{id}`"))
}

#[test]
fn test_builder_with_default_config() {
    let builder = DiagramBuilder::new(AppConfig::default()).expect("Failed to build registry");
    let representations: Vec<_> = builder.registry().representations().collect();
    assert_eq!(representations, Representation::ALL);
}

#[test]
fn test_render_class_diagram() {
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let model = builder.load_model(SHOP).expect("Failed to load model");
    let graph = builder
        .render(&model, Representation::Class)
        .expect("Failed to render");

    assert_eq!(graph.id(), "shop");
    let top: Vec<Id> = graph.children().iter().map(|c| c.id()).collect();
    assert_eq!(top, vec![
        Id::new("Order"),
        Id::new("Shape"),
        Id::new("Api"),
        Id::new("Money"),
        Id::new("Color"),
        Id::new("Order_extends_Shape"),
        Id::new("Order_realizes_Api"),
        Id::new("Order_uses_Api"),
    ]);

    let order = child(&graph, "Order");
    assert_eq!(order.element_type(), "class__Class");
    assert_eq!(order.label_texts(), vec!["Order", "+ total: Money {readOnly}"]);
    assert!(child(&graph, "Shape").has_css_class("font-italic"));
    assert_eq!(child(&graph, "Api").label_texts(), vec!["«interface»", "Api"]);
    assert_eq!(child(&graph, "Color").label_texts(), vec![
        "«enumeration»",
        "Color",
        "RED"
    ]);
}

#[test]
fn test_edges_keep_their_endpoints() {
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let model = builder.load_model(SHOP).unwrap();
    let graph = builder.render(&model, Representation::Class).unwrap();

    let ends = |id: &str| child(&graph, id).edge_ends();
    assert_eq!(
        ends("Order_extends_Shape"),
        Some((Id::new("Order"), Id::new("Shape")))
    );
    assert_eq!(
        ends("Order_realizes_Api"),
        Some((Id::new("Order"), Id::new("Api")))
    );
    assert_eq!(
        ends("Order_uses_Api"),
        Some((Id::new("Order"), Id::new("Api")))
    );
    assert_eq!(child(&graph, "Order_uses_Api").label_texts(), vec!["«use»"]);
}

#[test]
fn test_package_diagram_leaves_out_unbound_kinds() {
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let model = builder.load_model(SHOP).unwrap();
    let graph = builder.render(&model, Representation::Package).unwrap();

    let top: Vec<Id> = graph.children().iter().map(|c| c.id()).collect();
    assert_eq!(top, vec![
        Id::new("Order"),
        Id::new("Shape"),
        Id::new("Api"),
        Id::new("Order_uses_Api"),
    ]);
    assert_eq!(child(&graph, "Order").label_texts(), vec!["Order"]);
}

#[test]
fn test_render_json() {
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let model = builder.load_model(SHOP).unwrap();
    let json = builder.render_json(&model, Representation::Class).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["id"], "shop");
    assert_eq!(value["type"], "graph");
    assert_eq!(value["args"]["representation"], "class");
    assert_eq!(value["children"][0]["type"], "class__Class");
}

#[test]
fn test_disabled_representation() {
    let config = AppConfig::new(
        DiagramConfig::new(vec![Representation::Sequence], false),
        StyleConfig::default(),
    );
    let builder = DiagramBuilder::new(config).unwrap();
    let model = builder.load_model(SHOP).unwrap();

    let err = builder.render(&model, Representation::Class).unwrap_err();
    assert!(matches!(
        err,
        StencilError::Registry(RegistryError::UnknownRepresentation(Representation::Class))
    ));
}

#[test]
fn test_representation_enabled_twice() {
    let config = AppConfig::new(
        DiagramConfig::new(vec![Representation::Class, Representation::Class], false),
        StyleConfig::default(),
    );
    let err = DiagramBuilder::new(config).err().expect("duplicate should fail");
    assert!(matches!(
        err,
        StencilError::Registry(RegistryError::DuplicateRepresentation(Representation::Class))
    ));
}

#[test]
fn test_malformed_model() {
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let err = builder.load_model("{\"root\": \"m\",").unwrap_err();
    match err {
        StencilError::ModelFormat { src, .. } => assert_eq!(src, "{\"root\": \"m\","),
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn test_inconsistent_model() {
    let source = r#"{
        "root": "m",
        "elements": [
            {"id": "m", "type": "Model"},
            {"id": "A", "owner": "m", "name": "A", "type": "Class"}
        ]
    }"#;
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let err = builder.load_model(source).unwrap_err();
    assert!(matches!(err, StencilError::Model(_)));
}

#[test]
fn test_detached_containment_cycle_is_rejected() {
    let source = r#"{
        "root": "m",
        "elements": [
            {"id": "m", "type": "Model"},
            {"id": "P", "owner": "Q", "owned": ["Q"], "name": "P", "type": "Package"},
            {"id": "Q", "owner": "P", "owned": ["P"], "name": "Q", "type": "Package"}
        ]
    }"#;
    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let err = builder.load_model(source).unwrap_err();
    assert!(matches!(
        err,
        StencilError::Model(ModelError::ContainmentCycle(id)) if id == Id::new("P")
    ));
}

#[test]
fn test_strict_mapping_rejects_dangling_edge() {
    let source = r#"{
        "root": "m",
        "elements": [
            {"id": "m", "type": "Model", "owned": ["A", "g"]},
            {"id": "A", "owner": "m", "name": "A", "type": "Class", "owned": []},
            {"id": "g", "owner": "m", "type": "Usage", "clients": ["A"], "suppliers": ["ghost"]}
        ]
    }"#;

    let lenient = DiagramBuilder::new(AppConfig::default()).unwrap();
    let model = lenient.load_model(source).unwrap();
    let graph = lenient.render(&model, Representation::Class).unwrap();
    assert!(graph.find(Id::new("g")).is_none());

    let strict = DiagramBuilder::new(AppConfig::new(
        DiagramConfig::new(vec![Representation::Class], true),
        StyleConfig::default(),
    ))
    .unwrap();
    let err = strict.render(&model, Representation::Class).unwrap_err();
    assert!(matches!(err, StencilError::Mapping(_)));
}

#[test]
fn test_execute_registry_command() {
    use stencil::{
        operation::CreateOperation,
        uml::{TypeKey, UmlType},
    };

    let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    let mut model = builder.load_model(SHOP).unwrap();
    let registry = builder.registry().get(Representation::Class).unwrap();

    let op = CreateOperation::edge(
        TypeKey::new(Representation::Class, UmlType::Generalization),
        Id::new("Shape"),
        Id::new("Order"),
    );
    let mut command = registry.create(&model, &op).expect("applicable");
    builder.execute(&mut model, command.as_mut()).unwrap();

    let graph = builder.render(&model, Representation::Class).unwrap();
    let generalizations: Vec<_> = graph
        .children()
        .iter()
        .filter(|c| c.element_type() == "class__Generalization")
        .collect();
    assert_eq!(generalizations.len(), 2);

    let err = builder.execute(&mut model, command.as_mut()).unwrap_err();
    assert!(matches!(err, StencilError::Command(_)));
}

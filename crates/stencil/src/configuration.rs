//! Per-kind diagram configuration.
//!
//! A configuration declares, for one element kind in one representation,
//! which graphical category its type key maps to, whether it may sit on the
//! diagram root, and the type hints the editor uses to allow or refuse
//! gestures (move, delete, resize, reparent, connect).
//!
//! Hints name other element types. Only types that are actually registered
//! in the representation are kept, so a hint never refers to a type the
//! client does not know.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use stencil_core::uml::{Representation, TypeKey, UmlType};

/// The graphical category of a type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeCategory {
    Node,
    Edge,
}

/// Gesture permissions for a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeTypeHint {
    element_type_id: TypeKey,
    repositionable: bool,
    deletable: bool,
    resizable: bool,
    reparentable: bool,
    containable_element_type_ids: Vec<TypeKey>,
}

impl ShapeTypeHint {
    pub fn new(
        element_type_id: TypeKey,
        repositionable: bool,
        deletable: bool,
        resizable: bool,
        reparentable: bool,
        containable_element_type_ids: Vec<TypeKey>,
    ) -> Self {
        Self {
            element_type_id,
            repositionable,
            deletable,
            resizable,
            reparentable,
            containable_element_type_ids,
        }
    }

    pub fn element_type_id(&self) -> TypeKey {
        self.element_type_id
    }

    pub fn repositionable(&self) -> bool {
        self.repositionable
    }

    pub fn deletable(&self) -> bool {
        self.deletable
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn reparentable(&self) -> bool {
        self.reparentable
    }

    pub fn containable_element_type_ids(&self) -> &[TypeKey] {
        &self.containable_element_type_ids
    }
}

/// Gesture permissions and allowed ends for an edge type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeTypeHint {
    element_type_id: TypeKey,
    repositionable: bool,
    deletable: bool,
    routable: bool,
    source_element_type_ids: Vec<TypeKey>,
    target_element_type_ids: Vec<TypeKey>,
}

impl EdgeTypeHint {
    pub fn element_type_id(&self) -> TypeKey {
        self.element_type_id
    }

    pub fn repositionable(&self) -> bool {
        self.repositionable
    }

    pub fn deletable(&self) -> bool {
        self.deletable
    }

    pub fn routable(&self) -> bool {
        self.routable
    }

    pub fn source_element_type_ids(&self) -> &[TypeKey] {
        &self.source_element_type_ids
    }

    pub fn target_element_type_ids(&self) -> &[TypeKey] {
        &self.target_element_type_ids
    }
}

/// What a configuration can see of its representation while computing hints.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationContext<'a> {
    representation: Representation,
    registered: &'a IndexSet<TypeKey>,
}

impl<'a> ConfigurationContext<'a> {
    pub fn new(representation: Representation, registered: &'a IndexSet<TypeKey>) -> Self {
        Self {
            representation,
            registered,
        }
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Returns the registered type keys of every concrete metaclass that
    /// conforms to one of `allowed`, in registration order.
    pub fn existing_configuration_type_ids(&self, allowed: &[UmlType]) -> Vec<TypeKey> {
        self.registered
            .iter()
            .filter(|key| key.uml_type().conforms_to_any(allowed))
            .copied()
            .collect()
    }
}

/// Declarative configuration of one element kind.
pub trait ElementConfiguration: Send + Sync {
    /// The type key this configuration is registered under.
    fn type_key(&self) -> TypeKey;

    /// Type keys introduced by this configuration and their category.
    fn type_mappings(&self) -> IndexMap<TypeKey, ShapeCategory>;

    /// Type keys that may be placed directly on the diagram root.
    fn graph_containable_elements(&self) -> Vec<TypeKey> {
        Vec::new()
    }

    fn shape_type_hints(&self, _ctx: &ConfigurationContext<'_>) -> Vec<ShapeTypeHint> {
        Vec::new()
    }

    fn edge_type_hints(&self, _ctx: &ConfigurationContext<'_>) -> Vec<EdgeTypeHint> {
        Vec::new()
    }
}

/// Configuration of a node kind.
///
/// Defaults: repositionable, deletable, resizable and reparentable, not
/// containable on the diagram root, no containable children.
#[derive(Debug, Clone)]
pub struct NodeConfiguration {
    type_key: TypeKey,
    graph_containable: bool,
    repositionable: bool,
    deletable: bool,
    resizable: bool,
    reparentable: bool,
    containable: Vec<UmlType>,
}

impl NodeConfiguration {
    pub fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            graph_containable: false,
            repositionable: true,
            deletable: true,
            resizable: true,
            reparentable: true,
            containable: Vec::new(),
        }
    }

    /// Allows placing the node directly on the diagram root.
    pub fn graph_containable(mut self) -> Self {
        self.graph_containable = true;
        self
    }

    /// Sets the gesture flags in `ShapeTypeHint` order.
    pub fn with_flags(
        mut self,
        repositionable: bool,
        deletable: bool,
        resizable: bool,
        reparentable: bool,
    ) -> Self {
        self.repositionable = repositionable;
        self.deletable = deletable;
        self.resizable = resizable;
        self.reparentable = reparentable;
        self
    }

    /// Metaclasses whose nodes may be nested in this node.
    pub fn containable(mut self, containable: &[UmlType]) -> Self {
        self.containable = containable.to_vec();
        self
    }
}

impl ElementConfiguration for NodeConfiguration {
    fn type_key(&self) -> TypeKey {
        self.type_key
    }

    fn type_mappings(&self) -> IndexMap<TypeKey, ShapeCategory> {
        IndexMap::from([(self.type_key, ShapeCategory::Node)])
    }

    fn graph_containable_elements(&self) -> Vec<TypeKey> {
        if self.graph_containable {
            vec![self.type_key]
        } else {
            Vec::new()
        }
    }

    fn shape_type_hints(&self, ctx: &ConfigurationContext<'_>) -> Vec<ShapeTypeHint> {
        vec![ShapeTypeHint::new(
            self.type_key,
            self.repositionable,
            self.deletable,
            self.resizable,
            self.reparentable,
            ctx.existing_configuration_type_ids(&self.containable),
        )]
    }
}

/// Configuration of a relationship kind drawn as an edge.
#[derive(Debug, Clone)]
pub struct EdgeConfiguration {
    type_key: TypeKey,
    sources: Vec<UmlType>,
    targets: Vec<UmlType>,
}

impl EdgeConfiguration {
    /// Creates an edge configuration accepting the given end metaclasses.
    pub fn new(type_key: TypeKey, sources: &[UmlType], targets: &[UmlType]) -> Self {
        Self {
            type_key,
            sources: sources.to_vec(),
            targets: targets.to_vec(),
        }
    }
}

impl ElementConfiguration for EdgeConfiguration {
    fn type_key(&self) -> TypeKey {
        self.type_key
    }

    fn type_mappings(&self) -> IndexMap<TypeKey, ShapeCategory> {
        IndexMap::from([(self.type_key, ShapeCategory::Edge)])
    }

    fn edge_type_hints(&self, ctx: &ConfigurationContext<'_>) -> Vec<EdgeTypeHint> {
        vec![EdgeTypeHint {
            element_type_id: self.type_key,
            repositionable: false,
            deletable: true,
            routable: true,
            source_element_type_ids: ctx.existing_configuration_type_ids(&self.sources),
            target_element_type_ids: ctx.existing_configuration_type_ids(&self.targets),
        }]
    }
}

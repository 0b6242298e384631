//! Element types for the semantic model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{identifier::Id, uml::UmlType};

/// UML visibility of a named element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    /// All visibility literals in UML declaration order.
    pub const ALL: &'static [Visibility] = &[
        Visibility::Public,
        Visibility::Private,
        Visibility::Protected,
        Visibility::Package,
    ];

    /// Returns the literal used in property values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Package => "package",
        }
    }

    /// Returns the UML notation symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Public => '+',
            Self::Private => '-',
            Self::Protected => '#',
            Self::Package => '~',
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            "package" => Ok(Self::Package),
            _ => Err(format!(
                "invalid visibility `{s}`, valid values: public, private, protected, package"
            )),
        }
    }
}

/// Payload shared by structural features (UML `Property`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralFeatureData {
    #[serde(default)]
    is_read_only: bool,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    is_derived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_id: Option<Id>,
}

impl StructuralFeatureData {
    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    pub fn set_read_only(&mut self, value: bool) {
        self.is_read_only = value;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, value: bool) {
        self.is_static = value;
    }

    pub fn is_derived(&self) -> bool {
        self.is_derived
    }

    pub fn set_derived(&mut self, value: bool) {
        self.is_derived = value;
    }

    /// The id of the feature's type, if typed.
    pub fn type_id(&self) -> Option<Id> {
        self.type_id
    }

    pub fn set_type_id(&mut self, type_id: Option<Id>) {
        self.type_id = type_id;
    }
}

/// Client and supplier ends of a dependency-like relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyEnds {
    clients: Vec<Id>,
    suppliers: Vec<Id>,
}

impl DependencyEnds {
    pub fn new(clients: Vec<Id>, suppliers: Vec<Id>) -> Self {
        Self { clients, suppliers }
    }

    pub fn clients(&self) -> &[Id] {
        &self.clients
    }

    pub fn suppliers(&self) -> &[Id] {
        &self.suppliers
    }
}

/// Kind-specific data of a semantic element.
///
/// The serialized form is tagged by the `type` field carrying the UML
/// metaclass name, e.g. `{"type": "Generalization", "general": "Class_2"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ElementKind {
    Model,
    Package,
    Class {
        #[serde(default)]
        is_abstract: bool,
    },
    Interface,
    DataType,
    PrimitiveType,
    Enumeration,
    EnumerationLiteral,
    Property(StructuralFeatureData),
    /// The specific classifier is the owner of the generalization.
    Generalization {
        general: Id,
        #[serde(default = "default_true")]
        is_substitutable: bool,
    },
    Dependency(DependencyEnds),
    Abstraction(DependencyEnds),
    Realization(DependencyEnds),
    Usage(DependencyEnds),
    InterfaceRealization {
        implementing_classifier: Id,
        contract: Id,
    },
    Interaction,
    Lifeline {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        represents: Option<Id>,
    },
    Actor,
    UseCase,
    /// The extending use case is the owner of the extend.
    Extend { extended_case: Id },
    /// The including use case is the owner of the include.
    Include { addition: Id },
}

fn default_true() -> bool {
    true
}

impl ElementKind {
    /// Returns the concrete metaclass of this kind.
    pub fn uml_type(&self) -> UmlType {
        match self {
            Self::Model => UmlType::Model,
            Self::Package => UmlType::Package,
            Self::Class { .. } => UmlType::Class,
            Self::Interface => UmlType::Interface,
            Self::DataType => UmlType::DataType,
            Self::PrimitiveType => UmlType::PrimitiveType,
            Self::Enumeration => UmlType::Enumeration,
            Self::EnumerationLiteral => UmlType::EnumerationLiteral,
            Self::Property(_) => UmlType::Property,
            Self::Generalization { .. } => UmlType::Generalization,
            Self::Dependency(_) => UmlType::Dependency,
            Self::Abstraction(_) => UmlType::Abstraction,
            Self::Realization(_) => UmlType::Realization,
            Self::Usage(_) => UmlType::Usage,
            Self::InterfaceRealization { .. } => UmlType::InterfaceRealization,
            Self::Interaction => UmlType::Interaction,
            Self::Lifeline { .. } => UmlType::Lifeline,
            Self::Actor => UmlType::Actor,
            Self::UseCase => UmlType::UseCase,
            Self::Extend { .. } => UmlType::Extend,
            Self::Include { .. } => UmlType::Include,
        }
    }
}

/// A semantic model element.
///
/// Containment is stored on both sides: `owner` points up, `owned` keeps the
/// ordered list of contained element ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<Id>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    owned: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    visibility: Visibility,
    #[serde(flatten)]
    kind: ElementKind,
}

impl Element {
    /// Creates a detached element. Use [`Model::create`](crate::semantic::Model::create)
    /// to add elements to a model.
    pub fn new(id: Id, name: Option<String>, kind: ElementKind) -> Self {
        Self {
            id,
            owner: None,
            owned: Vec::new(),
            name,
            visibility: Visibility::default(),
            kind,
        }
    }

    /// Get the element identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the containing element, `None` for the model root.
    pub fn owner(&self) -> Option<Id> {
        self.owner
    }

    /// Ids of the directly contained elements, in containment order.
    pub fn owned(&self) -> &[Id] {
        &self.owned
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name, or an empty string for unnamed elements.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Returns the concrete metaclass of this element.
    pub fn uml_type(&self) -> UmlType {
        self.kind.uml_type()
    }

    /// Returns true if this element is an instance of `uml_type` or one of its subtypes.
    pub fn is_kind_of(&self, uml_type: UmlType) -> bool {
        self.uml_type().conforms_to(uml_type)
    }

    /// Borrow the structural feature payload, if this element is a feature.
    pub fn as_structural_feature(&self) -> Option<&StructuralFeatureData> {
        match &self.kind {
            ElementKind::Property(data) => Some(data),
            _ => None,
        }
    }

    /// Mutably borrow the structural feature payload, if this element is a feature.
    pub fn as_structural_feature_mut(&mut self) -> Option<&mut StructuralFeatureData> {
        match &mut self.kind {
            ElementKind::Property(data) => Some(data),
            _ => None,
        }
    }

    /// Borrow the dependency ends, if this element is a dependency-like relationship.
    pub fn as_dependency(&self) -> Option<&DependencyEnds> {
        match &self.kind {
            ElementKind::Dependency(ends)
            | ElementKind::Abstraction(ends)
            | ElementKind::Realization(ends)
            | ElementKind::Usage(ends) => Some(ends),
            _ => None,
        }
    }

    /// `isAbstract` of a class, `None` for other kinds.
    pub fn is_abstract(&self) -> Option<bool> {
        match &self.kind {
            ElementKind::Class { is_abstract } => Some(*is_abstract),
            _ => None,
        }
    }

    /// Sets `isAbstract` on a class. Ignored for other kinds.
    pub fn set_abstract(&mut self, value: bool) {
        if let ElementKind::Class { is_abstract } = &mut self.kind {
            *is_abstract = value;
        }
    }

    /// `isSubstitutable` of a generalization, `None` for other kinds.
    pub fn is_substitutable(&self) -> Option<bool> {
        match &self.kind {
            ElementKind::Generalization {
                is_substitutable, ..
            } => Some(*is_substitutable),
            _ => None,
        }
    }

    /// Sets `isSubstitutable` on a generalization. Ignored for other kinds.
    pub fn set_substitutable(&mut self, value: bool) {
        if let ElementKind::Generalization {
            is_substitutable, ..
        } = &mut self.kind
        {
            *is_substitutable = value;
        }
    }

    /// Returns true for directed relationships rendered as edges.
    pub fn is_relationship(&self) -> bool {
        self.is_kind_of(UmlType::Relationship)
    }

    /// The id of the source end of a directed relationship.
    ///
    /// - Generalization: the specific classifier (owner)
    /// - Dependency family: the first client
    /// - InterfaceRealization: the implementing classifier
    /// - Extend / Include: the extending / including use case (owner)
    ///
    /// Returns `None` for non-relationships and for relationships whose
    /// source end is unset.
    pub fn source_ref(&self) -> Option<Id> {
        match &self.kind {
            ElementKind::Generalization { .. }
            | ElementKind::Extend { .. }
            | ElementKind::Include { .. } => self.owner,
            ElementKind::InterfaceRealization {
                implementing_classifier,
                ..
            } => Some(*implementing_classifier),
            _ => self
                .as_dependency()
                .and_then(|ends| ends.clients.first().copied()),
        }
    }

    /// The id of the target end of a directed relationship.
    ///
    /// - Generalization: the general classifier
    /// - Dependency family: the first supplier
    /// - InterfaceRealization: the contract interface
    /// - Extend: the extended case; Include: the addition
    pub fn target_ref(&self) -> Option<Id> {
        match &self.kind {
            ElementKind::Generalization { general, .. } => Some(*general),
            ElementKind::InterfaceRealization { contract, .. } => Some(*contract),
            ElementKind::Extend { extended_case } => Some(*extended_case),
            ElementKind::Include { addition } => Some(*addition),
            _ => self
                .as_dependency()
                .and_then(|ends| ends.suppliers.first().copied()),
        }
    }

    /// Returns every non-containment reference held by this element.
    pub fn references(&self) -> Vec<Id> {
        match &self.kind {
            ElementKind::Generalization { general, .. } => vec![*general],
            ElementKind::InterfaceRealization {
                implementing_classifier,
                contract,
            } => vec![*implementing_classifier, *contract],
            ElementKind::Extend { extended_case } => vec![*extended_case],
            ElementKind::Include { addition } => vec![*addition],
            ElementKind::Property(data) => data.type_id.into_iter().collect(),
            ElementKind::Lifeline { represents } => represents.iter().copied().collect(),
            _ => self
                .as_dependency()
                .map(|ends| ends.clients.iter().chain(&ends.suppliers).copied().collect())
                .unwrap_or_default(),
        }
    }

    /// Clears optional references to `target`.
    ///
    /// Returns true if something was cleared. Mandatory relationship ends are
    /// not cleared; relationships losing an end are deleted by the model instead.
    pub(crate) fn clear_optional_reference(&mut self, target: Id) -> bool {
        match &mut self.kind {
            ElementKind::Property(data) if data.type_id == Some(target) => {
                data.type_id = None;
                true
            }
            ElementKind::Lifeline { represents } if *represents == Some(target) => {
                *represents = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<Id>) {
        self.owner = owner;
    }

    pub(crate) fn owned_mut(&mut self) -> &mut Vec<Id> {
        &mut self.owned
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} '{}' ({})", self.uml_type(), name, self.id),
            None => write!(f, "{} ({})", self.uml_type(), self.id),
        }
    }
}

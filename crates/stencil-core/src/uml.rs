//! UML metaclasses, diagram representations and element type keys.
//!
//! # Overview
//!
//! - [`UmlType`] - Abstract and concrete UML metaclasses with their generalization hierarchy
//! - [`Representation`] - A named diagram kind (class diagram, sequence diagram, ...)
//! - [`TypeKey`] - The `(representation, metaclass)` pair that joins semantic
//!   elements, graphical elements and configuration
//!
//! # Type Keys
//!
//! A type key is rendered as `<representation>__<Metaclass>`:
//!
//! ```
//! # use stencil_core::uml::{Representation, TypeKey, UmlType};
//! let key = TypeKey::new(Representation::Class, UmlType::Generalization);
//! assert_eq!(key.to_string(), "class__Generalization");
//! assert_eq!(key.representation(), Representation::Class);
//! assert_eq!(key.uml_type(), UmlType::Generalization);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identifier::Id;

/// Separator between the representation prefix and the metaclass name.
pub const TYPE_KEY_SEPARATOR: &str = "__";

/// UML metaclasses known to the bindings.
///
/// Abstract metaclasses never appear on model elements; they are used as
/// endpoint and container constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UmlType {
    // Abstract
    Element,
    NamedElement,
    Namespace,
    PackageableElement,
    Type,
    Classifier,
    BehavioredClassifier,
    Feature,
    TypedElement,
    StructuralFeature,
    Relationship,
    DirectedRelationship,
    // Concrete
    Model,
    Package,
    Class,
    Interface,
    DataType,
    PrimitiveType,
    Enumeration,
    EnumerationLiteral,
    Property,
    Generalization,
    Dependency,
    Abstraction,
    Realization,
    InterfaceRealization,
    Usage,
    Interaction,
    Lifeline,
    Actor,
    UseCase,
    Extend,
    Include,
}

impl UmlType {
    /// All concrete metaclasses, in declaration order.
    pub const CONCRETE: &'static [UmlType] = &[
        UmlType::Model,
        UmlType::Package,
        UmlType::Class,
        UmlType::Interface,
        UmlType::DataType,
        UmlType::PrimitiveType,
        UmlType::Enumeration,
        UmlType::EnumerationLiteral,
        UmlType::Property,
        UmlType::Generalization,
        UmlType::Dependency,
        UmlType::Abstraction,
        UmlType::Realization,
        UmlType::InterfaceRealization,
        UmlType::Usage,
        UmlType::Interaction,
        UmlType::Lifeline,
        UmlType::Actor,
        UmlType::UseCase,
        UmlType::Extend,
        UmlType::Include,
    ];

    /// Returns the metaclass name as it appears in type keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Element => "Element",
            Self::NamedElement => "NamedElement",
            Self::Namespace => "Namespace",
            Self::PackageableElement => "PackageableElement",
            Self::Type => "Type",
            Self::Classifier => "Classifier",
            Self::BehavioredClassifier => "BehavioredClassifier",
            Self::Feature => "Feature",
            Self::TypedElement => "TypedElement",
            Self::StructuralFeature => "StructuralFeature",
            Self::Relationship => "Relationship",
            Self::DirectedRelationship => "DirectedRelationship",
            Self::Model => "Model",
            Self::Package => "Package",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::DataType => "DataType",
            Self::PrimitiveType => "PrimitiveType",
            Self::Enumeration => "Enumeration",
            Self::EnumerationLiteral => "EnumerationLiteral",
            Self::Property => "Property",
            Self::Generalization => "Generalization",
            Self::Dependency => "Dependency",
            Self::Abstraction => "Abstraction",
            Self::Realization => "Realization",
            Self::InterfaceRealization => "InterfaceRealization",
            Self::Usage => "Usage",
            Self::Interaction => "Interaction",
            Self::Lifeline => "Lifeline",
            Self::Actor => "Actor",
            Self::UseCase => "UseCase",
            Self::Extend => "Extend",
            Self::Include => "Include",
        }
    }

    /// Returns true for metaclasses that cannot be instantiated.
    pub fn is_abstract(self) -> bool {
        !Self::CONCRETE.contains(&self)
    }

    /// Direct supertypes in the UML generalization hierarchy.
    ///
    /// The hierarchy is a trimmed version of the UML 2.5 metamodel, keeping
    /// only the metaclasses the bindings constrain on.
    pub fn supertypes(self) -> &'static [UmlType] {
        use UmlType::*;
        match self {
            Element => &[],
            NamedElement => &[Element],
            Namespace => &[NamedElement],
            PackageableElement => &[NamedElement],
            Type => &[PackageableElement],
            Classifier => &[Namespace, Type],
            BehavioredClassifier => &[Classifier],
            Feature => &[NamedElement],
            TypedElement => &[NamedElement],
            StructuralFeature => &[Feature, TypedElement],
            Relationship => &[Element],
            DirectedRelationship => &[Relationship],
            Model => &[Package],
            Package => &[Namespace, PackageableElement],
            Class => &[BehavioredClassifier],
            Interface => &[Classifier],
            DataType => &[Classifier],
            PrimitiveType => &[DataType],
            Enumeration => &[DataType],
            EnumerationLiteral => &[NamedElement],
            Property => &[StructuralFeature],
            Generalization => &[DirectedRelationship],
            Dependency => &[DirectedRelationship, PackageableElement],
            Abstraction => &[Dependency],
            Realization => &[Abstraction],
            InterfaceRealization => &[Realization],
            Usage => &[Dependency],
            Interaction => &[Class],
            Lifeline => &[NamedElement],
            Actor => &[BehavioredClassifier],
            UseCase => &[BehavioredClassifier],
            Extend => &[DirectedRelationship, NamedElement],
            Include => &[DirectedRelationship, NamedElement],
        }
    }

    /// Returns true if `self` is `other` or one of its (transitive) subtypes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stencil_core::uml::UmlType;
    /// assert!(UmlType::Class.conforms_to(UmlType::Classifier));
    /// assert!(UmlType::InterfaceRealization.conforms_to(UmlType::Dependency));
    /// assert!(!UmlType::Interface.conforms_to(UmlType::BehavioredClassifier));
    /// ```
    pub fn conforms_to(self, other: UmlType) -> bool {
        self == other || self.supertypes().iter().any(|s| s.conforms_to(other))
    }

    /// Returns true if `self` conforms to at least one of `others`.
    pub fn conforms_to_any(self, others: &[UmlType]) -> bool {
        others.iter().any(|other| self.conforms_to(*other))
    }
}

impl fmt::Display for UmlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for UmlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use UmlType::*;
        const ALL: &[UmlType] = &[
            Element,
            NamedElement,
            Namespace,
            PackageableElement,
            Type,
            Classifier,
            BehavioredClassifier,
            Feature,
            TypedElement,
            StructuralFeature,
            Relationship,
            DirectedRelationship,
        ];
        ALL.iter()
            .chain(UmlType::CONCRETE)
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown UML metaclass `{s}`"))
    }
}

/// A named diagram kind scoping type keys and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representation {
    Class,
    Package,
    Sequence,
    UseCase,
}

impl Representation {
    /// All supported representations.
    pub const ALL: &'static [Representation] = &[
        Representation::Class,
        Representation::Package,
        Representation::Sequence,
        Representation::UseCase,
    ];

    /// Returns the prefix used in type keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Package => "package",
            Self::Sequence => "sequence",
            Self::UseCase => "use-case",
        }
    }

    /// Returns a human-readable diagram name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Class => "Class Diagram",
            Self::Package => "Package Diagram",
            Self::Sequence => "Sequence Diagram",
            Self::UseCase => "Use Case Diagram",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Representation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "package" => Ok(Self::Package),
            "sequence" => Ok(Self::Sequence),
            "use-case" | "usecase" => Ok(Self::UseCase),
            _ => Err(format!(
                "invalid representation `{s}`, valid values: class, package, sequence, use-case"
            )),
        }
    }
}

/// Identifies one `(UML metaclass, representation)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    representation: Representation,
    uml_type: UmlType,
    id: Id,
}

impl TypeKey {
    /// Creates the key for `uml_type` within `representation`.
    pub fn new(representation: Representation, uml_type: UmlType) -> Self {
        let id = Id::new(&format!(
            "{}{TYPE_KEY_SEPARATOR}{}",
            representation.as_str(),
            uml_type.name()
        ));
        Self {
            representation,
            uml_type,
            id,
        }
    }

    /// Returns the representation this key is scoped to.
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Returns the metaclass this key identifies.
    pub fn uml_type(&self) -> UmlType {
        self.uml_type
    }

    /// Returns the interned string form of the key.
    pub fn id(&self) -> Id {
        self.id
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for TypeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (representation, uml_type) = s
            .split_once(TYPE_KEY_SEPARATOR)
            .ok_or_else(|| format!("type key `{s}` has no `{TYPE_KEY_SEPARATOR}` separator"))?;
        Ok(Self::new(representation.parse()?, uml_type.parse()?))
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

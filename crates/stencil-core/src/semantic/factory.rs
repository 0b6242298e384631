//! UML factory operations on [`Model`].
//!
//! These mirror the `create*` operations of the UML metamodel: each checks
//! the metaclass of its arguments, picks the owning element the way UML
//! does, and returns the id of the new element.

use std::{fmt, str::FromStr};

use log::debug;

use crate::{identifier::Id, uml::UmlType};

use super::{
    DependencyEnds, ElementKind, StructuralFeatureData,
    model::{Model, ModelError},
};

/// The dependency-family metaclass to instantiate in [`Model::create_dependency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Dependency,
    Abstraction,
    Realization,
    Usage,
}

impl DependencyKind {
    pub fn uml_type(self) -> UmlType {
        match self {
            Self::Dependency => UmlType::Dependency,
            Self::Abstraction => UmlType::Abstraction,
            Self::Realization => UmlType::Realization,
            Self::Usage => UmlType::Usage,
        }
    }

    fn into_kind(self, ends: DependencyEnds) -> ElementKind {
        match self {
            Self::Dependency => ElementKind::Dependency(ends),
            Self::Abstraction => ElementKind::Abstraction(ends),
            Self::Realization => ElementKind::Realization(ends),
            Self::Usage => ElementKind::Usage(ends),
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uml_type())
    }
}

impl FromStr for DependencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dependency" => Ok(Self::Dependency),
            "Abstraction" => Ok(Self::Abstraction),
            "Realization" => Ok(Self::Realization),
            "Usage" => Ok(Self::Usage),
            _ => Err(format!(
                "invalid dependency kind `{s}`, valid values: Dependency, Abstraction, Realization, Usage"
            )),
        }
    }
}

impl Model {
    /// Creates a packageable element directly inside `package`.
    ///
    /// # Errors
    ///
    /// Fails if `package` is not a package (or the model root).
    pub fn create_packaged_element(
        &mut self,
        package: Id,
        kind: ElementKind,
        name: Option<&str>,
    ) -> Result<Id, ModelError> {
        self.element_of(package, UmlType::Package)?;
        self.create(package, name, kind)
    }

    /// Makes `specific` a specialization of `general`.
    ///
    /// The generalization is owned by the specific classifier.
    ///
    /// # Errors
    ///
    /// Fails if either end is missing or not a classifier.
    pub fn create_generalization(&mut self, specific: Id, general: Id) -> Result<Id, ModelError> {
        self.element_of(specific, UmlType::Classifier)?;
        self.element_of(general, UmlType::Classifier)?;

        let id = self.create(
            specific,
            None,
            ElementKind::Generalization {
                general,
                is_substitutable: true,
            },
        )?;
        debug!(specific:% = specific, general:% = general; "Generalization created");
        Ok(id)
    }

    /// Creates a dependency-like relationship from `client` to `supplier`.
    ///
    /// The relationship is owned by the package nearest to the client.
    ///
    /// # Errors
    ///
    /// Fails if either end is missing or not a named element.
    pub fn create_dependency(
        &mut self,
        client: Id,
        supplier: Id,
        kind: DependencyKind,
    ) -> Result<Id, ModelError> {
        self.element_of(client, UmlType::NamedElement)?;
        self.element_of(supplier, UmlType::NamedElement)?;

        let owner = self.nearest_package(client).unwrap_or(self.root());
        let ends = DependencyEnds::new(vec![client], vec![supplier]);
        let id = self.create(owner, None, kind.into_kind(ends))?;
        debug!(kind:% = kind, client:% = client, supplier:% = supplier; "Dependency created");
        Ok(id)
    }

    /// Makes `implementing` realize the `contract` interface.
    ///
    /// # Errors
    ///
    /// Fails unless `implementing` is a behaviored classifier and
    /// `contract` an interface.
    pub fn create_interface_realization(
        &mut self,
        implementing: Id,
        contract: Id,
    ) -> Result<Id, ModelError> {
        self.element_of(implementing, UmlType::BehavioredClassifier)?;
        self.element_of(contract, UmlType::Interface)?;

        self.create(
            implementing,
            None,
            ElementKind::InterfaceRealization {
                implementing_classifier: implementing,
                contract,
            },
        )
    }

    /// Creates an extend from the `extension` use case to `extended_case`.
    ///
    /// # Errors
    ///
    /// Fails unless both ends are use cases.
    pub fn create_extend(&mut self, extension: Id, extended_case: Id) -> Result<Id, ModelError> {
        self.element_of(extension, UmlType::UseCase)?;
        self.element_of(extended_case, UmlType::UseCase)?;
        self.create(extension, None, ElementKind::Extend { extended_case })
    }

    /// Creates an include from the `including` use case to `addition`.
    ///
    /// # Errors
    ///
    /// Fails unless both ends are use cases.
    pub fn create_include(&mut self, including: Id, addition: Id) -> Result<Id, ModelError> {
        self.element_of(including, UmlType::UseCase)?;
        self.element_of(addition, UmlType::UseCase)?;
        self.create(including, None, ElementKind::Include { addition })
    }

    /// Adds an attribute to a classifier.
    ///
    /// # Errors
    ///
    /// Fails if `classifier` is not a classifier.
    pub fn create_owned_attribute(&mut self, classifier: Id, name: &str) -> Result<Id, ModelError> {
        self.element_of(classifier, UmlType::Classifier)?;
        self.create(
            classifier,
            Some(name),
            ElementKind::Property(StructuralFeatureData::default()),
        )
    }

    /// Adds a literal to an enumeration.
    ///
    /// # Errors
    ///
    /// Fails if `enumeration` is not an enumeration.
    pub fn create_owned_literal(&mut self, enumeration: Id, name: &str) -> Result<Id, ModelError> {
        self.element_of(enumeration, UmlType::Enumeration)?;
        self.create(enumeration, Some(name), ElementKind::EnumerationLiteral)
    }

    /// Adds a lifeline to an interaction.
    ///
    /// # Errors
    ///
    /// Fails if `interaction` is not an interaction.
    pub fn create_lifeline(&mut self, interaction: Id, name: &str) -> Result<Id, ModelError> {
        self.element_of(interaction, UmlType::Interaction)?;
        self.create(
            interaction,
            Some(name),
            ElementKind::Lifeline { represents: None },
        )
    }
}

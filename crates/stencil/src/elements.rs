//! Per-element bindings.
//!
//! Each submodule holds the mapper, providers and [`ElementManifest`] of one
//! UML element kind (or a small family of kinds rendered alike).
//!
//! [`ElementManifest`]: crate::manifest::ElementManifest

pub mod actor;
pub mod class;
pub mod classifier;
pub mod data_type;
pub mod dependency;
pub mod enumeration;
pub mod generalization;
pub mod interaction;
pub mod interface;
pub mod interface_realization;
pub mod lifeline;
pub mod named_element;
pub mod package;
pub mod structural_feature;
pub mod use_case;
pub mod use_case_relationship;

pub use actor::ActorManifest;
pub use class::{ClassManifest, ClassPropertyProvider};
pub use data_type::DataTypeManifest;
pub use dependency::DependencyManifest;
pub use enumeration::{EnumerationLiteralManifest, EnumerationManifest};
pub use generalization::{GeneralizationManifest, GeneralizationPropertyProvider};
pub use interaction::InteractionManifest;
pub use interface::InterfaceManifest;
pub use interface_realization::InterfaceRealizationManifest;
pub use lifeline::LifelineManifest;
pub use named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider};
pub use package::PackageManifest;
pub use structural_feature::{PropertyManifest, StructuralFeaturePropertyProvider};
pub use use_case::UseCaseManifest;
pub use use_case_relationship::{ExtendManifest, IncludeManifest};

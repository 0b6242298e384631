//! The element manifests making up each representation.

use stencil_core::{semantic::DependencyKind, uml::Representation};

use crate::{elements::*, manifest::ElementManifest};

/// Element manifests of `representation`, in registration order.
pub fn manifests(representation: Representation) -> Vec<Box<dyn ElementManifest>> {
    match representation {
        Representation::Class => vec![
            Box::new(PackageManifest),
            Box::new(ClassManifest),
            Box::new(InterfaceManifest),
            Box::new(DataTypeManifest::data_type()),
            Box::new(DataTypeManifest::primitive_type()),
            Box::new(EnumerationManifest),
            Box::new(EnumerationLiteralManifest),
            Box::new(PropertyManifest),
            Box::new(GeneralizationManifest),
            Box::new(DependencyManifest::new(DependencyKind::Dependency)),
            Box::new(DependencyManifest::new(DependencyKind::Abstraction)),
            Box::new(DependencyManifest::new(DependencyKind::Realization)),
            Box::new(DependencyManifest::new(DependencyKind::Usage)),
            Box::new(InterfaceRealizationManifest),
        ],
        Representation::Package => vec![
            Box::new(PackageManifest),
            Box::new(ClassManifest),
            Box::new(InterfaceManifest),
            Box::new(DependencyManifest::new(DependencyKind::Dependency)),
            Box::new(DependencyManifest::new(DependencyKind::Abstraction)),
            Box::new(DependencyManifest::new(DependencyKind::Usage)),
        ],
        Representation::Sequence => vec![Box::new(InteractionManifest), Box::new(LifelineManifest)],
        Representation::UseCase => vec![
            Box::new(PackageManifest),
            Box::new(ActorManifest),
            Box::new(UseCaseManifest),
            Box::new(GeneralizationManifest),
            Box::new(ExtendManifest),
            Box::new(IncludeManifest),
        ],
    }
}

//! Semantic-to-graphical mapping.
//!
//! A [`GModelMapper`] turns one semantic element into its graphical element,
//! including nested labels and compartments. Mappers are pure: the same
//! element in the same model always yields the same graphical element.
//!
//! The helpers in this module hold the parts every mapper shares: the node
//! and edge skeletons, name and keyword labels, and endpoint resolution for
//! relationships.

use std::fmt;

use thiserror::Error;

use stencil_core::{
    gmodel::{GModelBuilder, GModelElement, css, types},
    identifier::Id,
    semantic::{Element, ModelError},
    uml::{TypeKey, UmlType},
};

use crate::context::ProviderContext;

/// The end of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    Source,
    Target,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Errors raised while mapping semantic elements to graphical elements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("no mapper registered for `{0}`")]
    NoMapper(TypeKey),

    #[error("mapper for {expected} received {found} `{id}`")]
    UnexpectedElement {
        id: Id,
        expected: UmlType,
        found: UmlType,
    },

    #[error("relationship `{id}` has no {end}")]
    MissingEndpoint { id: Id, end: EdgeEnd },

    #[error("{end} of relationship `{id}` refers to missing element `{target}`")]
    DanglingReference { id: Id, end: EdgeEnd, target: Id },

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Maps semantic elements of one kind to graphical elements.
pub trait GModelMapper: Send + Sync {
    /// Builds the graphical element for `element`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the element cannot be drawn, e.g. a
    /// relationship with an unset or dangling end.
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError>;
}

/// Checks that `element` is of the metaclass the mapper handles.
pub fn expect_kind(element: &Element, expected: UmlType) -> Result<(), MappingError> {
    if element.is_kind_of(expected) {
        Ok(())
    } else {
        Err(MappingError::UnexpectedElement {
            id: element.id(),
            expected,
            found: element.uml_type(),
        })
    }
}

/// Resolves the source and target ends of a relationship.
///
/// # Errors
///
/// [`MappingError::MissingEndpoint`] if an end is unset and
/// [`MappingError::DanglingReference`] if it points to a missing element.
pub fn resolve_endpoints(
    ctx: &ProviderContext<'_>,
    element: &Element,
) -> Result<(Id, Id), MappingError> {
    let resolve = |end: EdgeEnd, reference: Option<Id>| -> Result<Id, MappingError> {
        let target = reference.ok_or(MappingError::MissingEndpoint {
            id: element.id(),
            end,
        })?;
        if ctx.model().contains(target) {
            Ok(target)
        } else {
            Err(MappingError::DanglingReference {
                id: element.id(),
                end,
                target,
            })
        }
    };

    Ok((
        resolve(EdgeEnd::Source, element.source_ref())?,
        resolve(EdgeEnd::Target, element.target_ref())?,
    ))
}

/// Starts the graphical node for `element` with the default CSS and size.
pub fn node_builder(ctx: &ProviderContext<'_>, element: &Element) -> GModelBuilder {
    GModelBuilder::node(element.id(), ctx.type_key(element.uml_type()).id())
        .css_classes(css::default_node_css())
        .size(ctx.style().node_size())
        .layout("vbox")
}

/// Starts the graphical edge for a relationship, resolving its ends.
pub fn edge_builder(
    ctx: &ProviderContext<'_>,
    element: &Element,
) -> Result<GModelBuilder, MappingError> {
    let (source, target) = resolve_endpoints(ctx, element)?;
    Ok(GModelBuilder::edge(
        element.id(),
        ctx.type_key(element.uml_type()).id(),
        source,
        target,
    )
    .css_classes(css::default_edge_css())
    .arg("edgePadding", ctx.style().edge_padding()))
}

/// The editable name label of a named element.
pub fn name_label(element: &Element) -> GModelElement {
    GModelBuilder::label(
        element.id().with_suffix("name"),
        types::LABEL_NAME.into(),
        element.label(),
    )
    .build()
}

/// A guillemet keyword label such as `«interface»`.
pub fn keyword_label(element: &Element, keyword: &str) -> GModelElement {
    GModelBuilder::label(
        element.id().with_suffix("keyword"),
        types::LABEL_KEYWORD.into(),
        format!("«{keyword}»"),
    )
    .build()
}

/// The header compartment: optional keyword followed by the name.
pub fn header(element: &Element, keyword: Option<&str>) -> GModelElement {
    let mut builder = GModelBuilder::compartment(
        element.id().with_suffix("header"),
        types::COMPARTMENT_HEADER.into(),
    )
    .layout("vbox");
    if let Some(keyword) = keyword {
        builder = builder.child(keyword_label(element, keyword));
    }
    builder.child(name_label(element)).build()
}

/// A compartment holding already mapped children.
pub fn compartment(
    element: &Element,
    suffix: &str,
    children: Vec<GModelElement>,
) -> GModelElement {
    GModelBuilder::compartment(element.id().with_suffix(suffix), types::COMPARTMENT.into())
        .layout("vbox")
        .children(children)
        .build()
}

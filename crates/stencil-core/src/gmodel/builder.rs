//! Fluent builder for [`GModelElement`].

use indexmap::IndexMap;

use crate::{geometry::Size, identifier::Id};

use super::{ArgValue, GModelElement, GModelKind};

/// Builds one graphical element.
///
/// ```
/// # use stencil_core::{gmodel::{GModelBuilder, css}, identifier::Id};
/// let edge = GModelBuilder::edge(
///     Id::new("g1"),
///     Id::new("class__Generalization"),
///     Id::new("A"),
///     Id::new("B"),
/// )
/// .css_classes(css::default_edge_css())
/// .css_class(css::Marker::TriangleEmpty.end())
/// .build();
/// assert_eq!(edge.edge_ends(), Some((Id::new("A"), Id::new("B"))));
/// ```
#[derive(Debug, Clone)]
pub struct GModelBuilder {
    id: Id,
    element_type: Id,
    css_classes: Vec<String>,
    args: IndexMap<String, ArgValue>,
    children: Vec<GModelElement>,
    kind: GModelKind,
}

impl GModelBuilder {
    fn new(id: Id, element_type: Id, kind: GModelKind) -> Self {
        Self {
            id,
            element_type,
            css_classes: Vec::new(),
            args: IndexMap::new(),
            children: Vec::new(),
            kind,
        }
    }

    /// Starts the root graph element.
    pub fn graph(id: Id, element_type: Id) -> Self {
        Self::new(id, element_type, GModelKind::Graph)
    }

    pub fn node(id: Id, element_type: Id) -> Self {
        Self::new(
            id,
            element_type,
            GModelKind::Node {
                size: None,
                layout: None,
            },
        )
    }

    pub fn edge(id: Id, element_type: Id, source: Id, target: Id) -> Self {
        Self::new(
            id,
            element_type,
            GModelKind::Edge {
                source_id: source,
                target_id: target,
            },
        )
    }

    pub fn label(id: Id, element_type: Id, text: impl Into<String>) -> Self {
        Self::new(id, element_type, GModelKind::Label { text: text.into() })
    }

    pub fn compartment(id: Id, element_type: Id) -> Self {
        Self::new(id, element_type, GModelKind::Compartment { layout: None })
    }

    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.css_classes.contains(&class) {
            self.css_classes.push(class);
        }
        self
    }

    /// Adds several CSS classes, skipping duplicates and keeping order.
    pub fn css_classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        classes
            .into_iter()
            .fold(self, |builder, class| builder.css_class(class))
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Sets the size hint. Ignored for non-node elements.
    pub fn size(mut self, value: Size) -> Self {
        if let GModelKind::Node { size, .. } = &mut self.kind {
            *size = Some(value);
        }
        self
    }

    /// Sets the client layout (`vbox`, `hbox`, ...) of a node or compartment.
    pub fn layout(mut self, value: impl Into<String>) -> Self {
        match &mut self.kind {
            GModelKind::Node { layout, .. } | GModelKind::Compartment { layout } => {
                *layout = Some(value.into());
            }
            _ => {}
        }
        self
    }

    pub fn child(mut self, child: GModelElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = GModelElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> GModelElement {
        GModelElement::from_parts(
            self.id,
            self.element_type,
            self.css_classes,
            self.args,
            self.children,
            self.kind,
        )
    }
}

impl GModelElement {
    /// Appends children to an already built element.
    pub fn extend_children(&mut self, children: impl IntoIterator<Item = GModelElement>) {
        for child in children {
            self.push_child(child);
        }
    }
}

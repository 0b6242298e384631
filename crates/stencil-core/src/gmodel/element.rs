//! Graphical element value types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{geometry::Size, identifier::Id};

/// A free-form argument attached to a graphical element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Kind-specific payload of a graphical element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GModelKind {
    Graph,
    Node {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<Size>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layout: Option<String>,
    },
    Edge {
        source_id: Id,
        target_id: Id,
    },
    Label {
        text: String,
    },
    Compartment {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        layout: Option<String>,
    },
}

/// One element of the graphical model tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GModelElement {
    id: Id,
    #[serde(rename = "type")]
    element_type: Id,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    css_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    args: IndexMap<String, ArgValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<GModelElement>,
    #[serde(flatten)]
    kind: GModelKind,
}

impl GModelElement {
    pub(crate) fn from_parts(
        id: Id,
        element_type: Id,
        css_classes: Vec<String>,
        args: IndexMap<String, ArgValue>,
        children: Vec<GModelElement>,
        kind: GModelKind,
    ) -> Self {
        Self {
            id,
            element_type,
            css_classes,
            args,
            children,
            kind,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The type id: a type key for nodes and edges, a generic id otherwise.
    pub fn element_type(&self) -> Id {
        self.element_type
    }

    pub fn css_classes(&self) -> &[String] {
        &self.css_classes
    }

    pub fn has_css_class(&self, class: &str) -> bool {
        self.css_classes.iter().any(|c| c == class)
    }

    pub fn args(&self) -> &IndexMap<String, ArgValue> {
        &self.args
    }

    pub fn children(&self) -> &[GModelElement] {
        &self.children
    }

    pub fn kind(&self) -> &GModelKind {
        &self.kind
    }

    pub fn is_node(&self) -> bool {
        matches!(self.kind, GModelKind::Node { .. })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, GModelKind::Edge { .. })
    }

    /// Source and target element ids of an edge.
    pub fn edge_ends(&self) -> Option<(Id, Id)> {
        match self.kind {
            GModelKind::Edge {
                source_id,
                target_id,
            } => Some((source_id, target_id)),
            _ => None,
        }
    }

    /// Text of a label element.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            GModelKind::Label { text } => Some(text),
            _ => None,
        }
    }

    pub(crate) fn push_child(&mut self, child: GModelElement) {
        self.children.push(child);
    }

    /// Depth-first pre-order iterator over this element and its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &GModelElement> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// Finds an element by id in this subtree.
    pub fn find(&self, id: Id) -> Option<&GModelElement> {
        self.iter().find(|element| element.id == id)
    }

    /// Texts of all labels in this subtree, in tree order.
    pub fn label_texts(&self) -> Vec<&str> {
        self.iter().filter_map(GModelElement::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gmodel::{GModelBuilder, types};

    #[test]
    fn test_iter_is_pre_order() {
        let node = GModelBuilder::node(Id::new("A"), Id::new("class__Class"))
            .child(GModelBuilder::label(Id::new("A_name"), Id::new(types::LABEL_NAME), "A").build())
            .child(
                GModelBuilder::compartment(Id::new("A_body"), Id::new(types::COMPARTMENT))
                    .child(
                        GModelBuilder::label(Id::new("x"), Id::new(types::LABEL_TEXT), "x").build(),
                    )
                    .build(),
            )
            .build();

        let ids: Vec<String> = node.iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["A", "A_name", "A_body", "x"]);
        assert_eq!(node.label_texts(), vec!["A", "x"]);
        assert!(node.find(Id::new("x")).is_some());
        assert!(node.find(Id::new("y")).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let edge = GModelBuilder::edge(
            Id::new("g1"),
            Id::new("class__Generalization"),
            Id::new("A"),
            Id::new("B"),
        )
        .css_class("edge")
        .arg("routing", "manhattan")
        .build();

        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["type"], "class__Generalization");
        assert_eq!(value["kind"], "edge");
        assert_eq!(value["sourceId"], "A");
        assert_eq!(value["targetId"], "B");
        assert_eq!(value["cssClasses"][0], "edge");
        assert_eq!(value["args"]["routing"], "manhattan");
        assert!(value.get("children").is_none());
    }

    #[test]
    fn test_edge_ends_only_for_edges() {
        let label = GModelBuilder::label(Id::new("l"), Id::new(types::LABEL_TEXT), "t").build();
        assert_eq!(label.edge_ends(), None);
        assert_eq!(label.text(), Some("t"));
        assert!(!label.is_node());
    }
}

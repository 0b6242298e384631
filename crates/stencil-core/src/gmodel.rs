//! Graphical model (GModel) types.
//!
//! The graphical model is the tree of nodes, edges, labels and compartments
//! sent to the diagram editor. It is recomputed from the semantic model on
//! every refresh and never edited in place.
//!
//! # Overview
//!
//! - [`GModelElement`] - One graphical element with its children
//! - [`GModelKind`] - Node, edge, label, compartment or graph payload
//! - [`GModelBuilder`] - Fluent construction of graphical elements
//! - [`css`] - CSS class names and edge markers understood by the client
//! - [`types`] - Type ids of the generic child elements (labels, compartments)

pub mod builder;
pub mod css;
pub mod element;

pub use builder::GModelBuilder;
pub use element::{ArgValue, GModelElement, GModelKind};

/// Type ids of generic graphical elements.
///
/// Nodes and edges use their element's type key; nested parts use these.
pub mod types {
    pub const GRAPH: &str = "graph";
    pub const LABEL_NAME: &str = "label:name";
    pub const LABEL_TEXT: &str = "label:text";
    pub const LABEL_KEYWORD: &str = "label:keyword";
    pub const COMPARTMENT: &str = "comp:comp";
    pub const COMPARTMENT_HEADER: &str = "comp:header";
}

//! Configuration types for Stencil diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining diagram and style settings.
//! - [`DiagramConfig`] - Which representations are registered and how mapping failures are handled.
//! - [`StyleConfig`] - Size and spacing hints attached to graphical elements.
//!
//! # Example
//!
//! ```
//! # use stencil::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.diagram().representations().len(), 4);
//! assert!(!config.diagram().strict_mapping());
//! ```

use serde::Deserialize;

use stencil_core::{geometry::Size, uml::Representation};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram configuration section.
    #[serde(default)]
    diagram: DiagramConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given sections.
    pub fn new(diagram: DiagramConfig, style: StyleConfig) -> Self {
        Self { diagram, style }
    }

    /// Returns the diagram configuration.
    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Controls registry construction and graphical model generation.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramConfig {
    /// Representations whose manifests are registered.
    #[serde(default = "default_representations")]
    representations: Vec<Representation>,

    /// Abort rendering on the first element that fails to map instead of
    /// skipping it.
    #[serde(default)]
    strict_mapping: bool,
}

fn default_representations() -> Vec<Representation> {
    Representation::ALL.to_vec()
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            representations: default_representations(),
            strict_mapping: false,
        }
    }
}

impl DiagramConfig {
    pub fn new(representations: Vec<Representation>, strict_mapping: bool) -> Self {
        Self {
            representations,
            strict_mapping,
        }
    }

    /// Returns the enabled representations.
    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }

    /// Returns whether mapping failures abort rendering.
    pub fn strict_mapping(&self) -> bool {
        self.strict_mapping
    }
}

/// Size and spacing hints for graphical elements.
///
/// The client layout owns final placement; these values only seed it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_node_width")]
    node_width: f64,

    #[serde(default = "default_node_height")]
    node_height: f64,

    /// Extra clickable area around edges, in pixels.
    #[serde(default = "default_edge_padding")]
    edge_padding: f64,
}

fn default_node_width() -> f64 {
    120.0
}

fn default_node_height() -> f64 {
    60.0
}

fn default_edge_padding() -> f64 {
    10.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            edge_padding: default_edge_padding(),
        }
    }
}

impl StyleConfig {
    pub fn new(node_size: Size, edge_padding: f64) -> Self {
        Self {
            node_width: node_size.width(),
            node_height: node_size.height(),
            edge_padding,
        }
    }

    /// Returns the initial size of top-level nodes.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn edge_padding(&self) -> f64 {
        self.edge_padding
    }
}

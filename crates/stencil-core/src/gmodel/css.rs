//! CSS classes understood by the diagram client.
//!
//! Edge line style and end markers are expressed as CSS classes on the edge
//! element; the client stylesheet maps them to `stroke-dasharray` and SVG
//! markers.
//!
//! | Class | Effect |
//! |-------|--------|
//! | `edge-dashed` | dashed line |
//! | `marker-<kind>-start` / `marker-<kind>-end` | marker on the source / target end |
//! | `font-italic` | italic name, used for abstract classifiers |

use std::{fmt, str::FromStr};

pub const NODE: &str = "uml-node";
pub const EDGE: &str = "uml-edge";
pub const EDGE_DASHED: &str = "edge-dashed";
pub const FONT_ITALIC: &str = "font-italic";
pub const FONT_BOLD: &str = "font-bold";
pub const TEXT_UNDERLINE: &str = "text-underline";

/// Edge end markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Hollow triangle: generalization and realization.
    TriangleEmpty,
    /// Filled triangle.
    Triangle,
    /// Open arrow head: dependencies.
    Arrow,
    /// Hollow diamond: shared aggregation.
    DiamondEmpty,
    /// Filled diamond: composite aggregation.
    Diamond,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TriangleEmpty => "triangle-empty",
            Self::Triangle => "triangle",
            Self::Arrow => "arrow",
            Self::DiamondEmpty => "diamond-empty",
            Self::Diamond => "diamond",
        }
    }

    /// Class placing the marker on the source end.
    pub fn start(self) -> String {
        format!("marker-{}-start", self.as_str())
    }

    /// Class placing the marker on the target end.
    pub fn end(self) -> String {
        format!("marker-{}-end", self.as_str())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Marker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triangle-empty" => Ok(Self::TriangleEmpty),
            "triangle" => Ok(Self::Triangle),
            "arrow" => Ok(Self::Arrow),
            "diamond-empty" => Ok(Self::DiamondEmpty),
            "diamond" => Ok(Self::Diamond),
            _ => Err(format!(
                "invalid marker `{s}`, valid values: triangle-empty, triangle, arrow, diamond-empty, diamond"
            )),
        }
    }
}

/// CSS classes every node starts with.
pub fn default_node_css() -> Vec<String> {
    vec![NODE.to_string()]
}

/// CSS classes every edge starts with.
pub fn default_edge_css() -> Vec<String> {
    vec![EDGE.to_string()]
}

//! Geometric primitives carried by graphical model elements.
//!
//! Nodes carry a [`Size`] hint only. Placement is left to the client-side
//! layout.

use serde::{Deserialize, Serialize};

/// Width and height of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns true unless both dimensions are positive.
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_size_serialization() {
        let size: Size = serde_json::from_str(r#"{"width": 120.5, "height": 60}"#).unwrap();
        assert_approx_eq!(f64, size.width(), 120.5);
        assert_approx_eq!(f64, size.height(), 60.0);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::default().is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(Size::new(10.0, f64::NAN).is_empty());
        assert!(!Size::new(10.0, 1.0).is_empty());
    }
}

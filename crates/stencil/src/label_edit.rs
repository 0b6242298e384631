//! In-place label editing.

use stencil_core::{command::Command, semantic::Element};

use crate::context::ProviderContext;

/// Validates and applies direct edits of an element's label.
pub trait LabelEditHandler: Send + Sync {
    /// Checks `text` before the edit is committed.
    ///
    /// # Errors
    ///
    /// Returns a message shown next to the label editor.
    fn validate(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
        text: &str,
    ) -> Result<(), String>;

    /// Returns the command applying `text`, or `None` if this handler does
    /// not edit labels of `element`.
    fn edit_label(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
        text: &str,
    ) -> Option<Box<dyn Command>>;
}

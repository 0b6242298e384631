//! Bindings shared by every named element.

use log::debug;

use stencil_core::{
    command::{Command, RecordingCommand},
    semantic::{Element, Visibility},
    uml::UmlType,
};

use crate::{
    context::ProviderContext,
    label_edit::LabelEditHandler,
    property::{ElementPropertyBuilder, PropertyItem, PropertyProvider, PropertySetters},
};

pub const NAME: &str = "name";
pub const VISIBILITY: &str = "visibility";

/// Exposes `name` and `visibility`.
#[derive(Debug)]
pub struct NamedElementPropertyProvider {
    setters: PropertySetters,
}

impl NamedElementPropertyProvider {
    pub fn new() -> Self {
        Self {
            setters: PropertySetters::new()
                .with_text(NAME, |element, name| element.set_name(Some(name)))
                .with_choice(VISIBILITY, Element::set_visibility),
        }
    }
}

impl Default for NamedElementPropertyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyProvider for NamedElementPropertyProvider {
    fn provide(&self, _ctx: &ProviderContext<'_>, element: &Element) -> Vec<PropertyItem> {
        ElementPropertyBuilder::new(element.id())
            .text(NAME, "Name", element.label())
            .choice(
                VISIBILITY,
                "Visibility",
                element.visibility().as_str(),
                Visibility::ALL.iter().map(|v| v.as_str()),
            )
            .items()
    }

    fn setters(&self) -> &PropertySetters {
        &self.setters
    }
}

/// Renames named elements through their name label.
#[derive(Debug, Default)]
pub struct NamedElementLabelEditHandler;

impl LabelEditHandler for NamedElementLabelEditHandler {
    fn validate(
        &self,
        _ctx: &ProviderContext<'_>,
        _element: &Element,
        text: &str,
    ) -> Result<(), String> {
        if text.trim().is_empty() {
            Err("name must not be empty".to_string())
        } else {
            Ok(())
        }
    }

    fn edit_label(
        &self,
        _ctx: &ProviderContext<'_>,
        element: &Element,
        text: &str,
    ) -> Option<Box<dyn Command>> {
        if !element.is_kind_of(UmlType::NamedElement) {
            debug!(id:% = element.id(); "Label edit on unnamed element");
            return None;
        }
        let id = element.id();
        let name = text.trim().to_string();
        Some(Box::new(RecordingCommand::new("Rename", move |model| {
            model.update(id, |element| element.set_name(Some(name)))
        })))
    }
}

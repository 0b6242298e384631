//! Property palette bindings.
//!
//! A [`PropertyProvider`] exposes a fixed set of editable properties of an
//! element as [`PropertyItem`]s and turns a [`PropertyUpdate`] into a
//! command. Each provider owns a [`PropertySetters`] table mapping property
//! ids to typed setters; the raw update text is coerced to the setter's type
//! before the command runs.
//!
//! An update for a property id the provider does not manage produces a
//! no-op command.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use stencil_core::{
    command::{Command, NoopCommand, RecordingCommand},
    identifier::Id,
    semantic::Element,
};

use crate::context::ProviderContext;

/// The value of a property item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertyValue {
    Text { value: String },
    Bool { value: bool },
    Choice { value: String, choices: Vec<String> },
}

impl PropertyValue {
    /// The value as it would be sent back in an update.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text { value } | Self::Choice { value, .. } => value.clone(),
            Self::Bool { value } => value.to_string(),
        }
    }
}

/// One editable property of one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyItem {
    element_id: Id,
    property_id: String,
    label: String,
    value: PropertyValue,
}

impl PropertyItem {
    pub fn element_id(&self) -> Id {
        self.element_id
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }
}

/// Collects the property items of one element in palette order.
#[derive(Debug)]
pub struct ElementPropertyBuilder {
    element_id: Id,
    items: Vec<PropertyItem>,
}

impl ElementPropertyBuilder {
    pub fn new(element_id: Id) -> Self {
        Self {
            element_id,
            items: Vec::new(),
        }
    }

    fn push(mut self, property_id: &str, label: &str, value: PropertyValue) -> Self {
        self.items.push(PropertyItem {
            element_id: self.element_id,
            property_id: property_id.to_string(),
            label: label.to_string(),
            value,
        });
        self
    }

    pub fn text(self, property_id: &str, label: &str, value: impl Into<String>) -> Self {
        self.push(property_id, label, PropertyValue::Text {
            value: value.into(),
        })
    }

    pub fn bool(self, property_id: &str, label: &str, value: bool) -> Self {
        self.push(property_id, label, PropertyValue::Bool { value })
    }

    pub fn choice<I, S>(self, property_id: &str, label: &str, value: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(property_id, label, PropertyValue::Choice {
            value: value.to_string(),
            choices: choices.into_iter().map(Into::into).collect(),
        })
    }

    pub fn items(self) -> Vec<PropertyItem> {
        self.items
    }
}

/// A request to change one property of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpdate {
    element_id: Id,
    property_id: String,
    value: String,
}

impl PropertyUpdate {
    pub fn new(element_id: Id, property_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            element_id,
            property_id: property_id.into(),
            value: value.into(),
        }
    }

    pub fn element_id(&self) -> Id {
        self.element_id
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parses a boolean the lenient way the palette sends them: `"true"` in any
/// letter case is true, everything else is false.
///
/// ```
/// # use stencil::property::parse_bool;
/// assert!(parse_bool("TRUE"));
/// assert!(!parse_bool("yes"));
/// assert!(!parse_bool(""));
/// ```
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

type Apply = Box<dyn FnOnce(&mut Element) + Send>;

type ChoiceSetter = Box<dyn Fn(&str) -> Result<Apply, String> + Send + Sync>;

enum Setter {
    Bool(fn(&mut Element, bool)),
    Text(fn(&mut Element, String)),
    Choice(ChoiceSetter),
}

/// Typed setters of one provider, keyed by property id.
#[derive(Default)]
pub struct PropertySetters {
    setters: IndexMap<&'static str, Setter>,
}

impl PropertySetters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bool(mut self, property_id: &'static str, setter: fn(&mut Element, bool)) -> Self {
        self.setters.insert(property_id, Setter::Bool(setter));
        self
    }

    pub fn with_text(mut self, property_id: &'static str, setter: fn(&mut Element, String)) -> Self {
        self.setters.insert(property_id, Setter::Text(setter));
        self
    }

    /// Registers a setter for a value parsed with `T`'s [`FromStr`].
    pub fn with_choice<T>(mut self, property_id: &'static str, setter: fn(&mut Element, T)) -> Self
    where
        T: FromStr + Send + 'static,
        T::Err: fmt::Display,
    {
        let parse = move |raw: &str| -> Result<Apply, String> {
            let value = raw.parse::<T>().map_err(|err| err.to_string())?;
            Ok(Box::new(move |element: &mut Element| setter(element, value)))
        };
        self.setters
            .insert(property_id, Setter::Choice(Box::new(parse)));
        self
    }

    pub fn contains(&self, property_id: &str) -> bool {
        self.setters.contains_key(property_id)
    }

    /// Property ids in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.setters.keys().copied()
    }

    /// Builds the command applying `update`.
    ///
    /// Returns a [`NoopCommand`] for unknown property ids and for choice
    /// values that do not parse.
    pub fn command(&self, update: &PropertyUpdate) -> Box<dyn Command> {
        let label = format!("Set {}", update.property_id());
        let Some(setter) = self.setters.get(update.property_id()) else {
            debug!(property = update.property_id(); "Unknown property, nothing to update");
            return Box::new(NoopCommand::new(label));
        };

        let apply: Apply = match setter {
            Setter::Bool(set) => {
                let (set, value) = (*set, parse_bool(update.value()));
                Box::new(move |element: &mut Element| set(element, value))
            }
            Setter::Text(set) => {
                let (set, value) = (*set, update.value().to_string());
                Box::new(move |element: &mut Element| set(element, value))
            }
            Setter::Choice(parse) => match parse(update.value()) {
                Ok(apply) => apply,
                Err(err) => {
                    warn!(
                        property = update.property_id(),
                        value = update.value(),
                        err = err.as_str();
                        "Rejected property value"
                    );
                    return Box::new(NoopCommand::new(label));
                }
            },
        };

        let id = update.element_id();
        Box::new(RecordingCommand::new(label, move |model| {
            model.update(id, apply)
        }))
    }
}

impl fmt::Debug for PropertySetters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.setters.keys()).finish()
    }
}

/// Exposes and edits a fixed set of properties of an element.
pub trait PropertyProvider: Send + Sync {
    /// Property items of `element`, one per managed property id, in a
    /// stable order.
    fn provide(&self, ctx: &ProviderContext<'_>, element: &Element) -> Vec<PropertyItem>;

    /// The setter table of this provider.
    fn setters(&self) -> &PropertySetters;

    /// Returns the command applying `update` to `element`.
    fn handle(
        &self,
        _ctx: &ProviderContext<'_>,
        update: &PropertyUpdate,
        element: &Element,
    ) -> Box<dyn Command> {
        if update.element_id() != element.id() {
            warn!(update:% = update.element_id(), element:% = element.id(); "Update addressed to another element");
            return Box::new(NoopCommand::new(format!("Set {}", update.property_id())));
        }
        self.setters().command(update)
    }
}

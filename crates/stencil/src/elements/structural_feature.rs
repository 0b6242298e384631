//! Property (structural feature) bindings.

use stencil_core::{
    gmodel::{GModelBuilder, GModelElement, css},
    semantic::Element,
    uml::UmlType,
};

use crate::{
    configuration::NodeConfiguration,
    context::ProviderContext,
    elements::named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateNodeArgument, NodeOperationHandler},
    property::{ElementPropertyBuilder, PropertyItem, PropertyProvider, PropertySetters},
    registry::RegistryError,
};

pub const IS_READ_ONLY: &str = "isReadOnly";

/// Exposes `isReadOnly` of a structural feature.
#[derive(Debug)]
pub struct StructuralFeaturePropertyProvider {
    setters: PropertySetters,
}

impl StructuralFeaturePropertyProvider {
    pub fn new() -> Self {
        Self {
            setters: PropertySetters::new().with_bool(IS_READ_ONLY, |element, value| {
                if let Some(feature) = element.as_structural_feature_mut() {
                    feature.set_read_only(value);
                }
            }),
        }
    }
}

impl Default for StructuralFeaturePropertyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyProvider for StructuralFeaturePropertyProvider {
    fn provide(&self, _ctx: &ProviderContext<'_>, element: &Element) -> Vec<PropertyItem> {
        let Some(feature) = element.as_structural_feature() else {
            return Vec::new();
        };
        ElementPropertyBuilder::new(element.id())
            .bool(IS_READ_ONLY, "Is Read Only", feature.is_read_only())
            .items()
    }

    fn setters(&self) -> &PropertySetters {
        &self.setters
    }
}

/// Draws a property as one row: `+ name: Type {readOnly}`.
///
/// Static features are underlined.
#[derive(Debug, Default)]
pub struct PropertyMapper;

impl PropertyMapper {
    fn text(ctx: &ProviderContext<'_>, element: &Element) -> String {
        let mut text = format!("{} {}", element.visibility().symbol(), element.label());
        let Some(feature) = element.as_structural_feature() else {
            return text;
        };
        if feature.is_derived() {
            text.insert(2, '/');
        }
        if let Some(type_name) = feature
            .type_id()
            .and_then(|id| ctx.model().get(id))
            .and_then(Element::name)
        {
            text.push_str(": ");
            text.push_str(type_name);
        }
        if feature.is_read_only() {
            text.push_str(" {readOnly}");
        }
        text
    }
}

impl GModelMapper for PropertyMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::Property)?;
        let mut builder = GModelBuilder::label(
            element.id(),
            ctx.type_key(UmlType::Property).id(),
            Self::text(ctx, element),
        );
        if element
            .as_structural_feature()
            .is_some_and(|feature| feature.is_static())
        {
            builder = builder.css_class(css::TEXT_UNDERLINE);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Default)]
pub struct PropertyManifest;

impl ElementManifest for PropertyManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Property
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Property);
        binder.bind_mapper(UmlType::Property, PropertyMapper)?;
        binder.bind_configuration(NodeConfiguration::new(key).with_flags(false, true, false, true))?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Classifier], |model, classifier, name| {
                model.create_owned_attribute(classifier, name)
            }),
        ))?;
        binder.bind_label_edit(UmlType::Property, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Property, NamedElementPropertyProvider::new());
        binder.bind_property_provider(UmlType::Property, StructuralFeaturePropertyProvider::new());
        Ok(())
    }
}

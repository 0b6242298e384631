//! Lifeline bindings.

use stencil_core::{
    gmodel::{GModelBuilder, GModelElement, types},
    semantic::{Element, ElementKind},
    uml::UmlType,
};

use crate::{
    configuration::NodeConfiguration,
    context::ProviderContext,
    elements::named_element::{NamedElementLabelEditHandler, NamedElementPropertyProvider},
    manifest::{ElementBinder, ElementManifest},
    mapper::{self, GModelMapper, MappingError},
    operation::{CreateNodeArgument, NodeOperationHandler},
    registry::RegistryError,
};

/// Draws a lifeline as a head box with its name and an empty body holding
/// the dashed line.
///
/// When the lifeline represents a typed element, the head reads
/// `name : Type`.
#[derive(Debug, Default)]
pub struct LifelineMapper;

impl LifelineMapper {
    fn head_text(ctx: &ProviderContext<'_>, element: &Element) -> Option<String> {
        let represents = match element.kind() {
            ElementKind::Lifeline { represents } => (*represents)?,
            _ => return None,
        };
        let name = ctx.model().get(represents)?.name()?;
        Some(format!("{} : {name}", element.label()))
    }
}

impl GModelMapper for LifelineMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, UmlType::Lifeline)?;
        let head = match Self::head_text(ctx, element) {
            Some(text) => GModelBuilder::label(
                element.id().with_suffix("name"),
                types::LABEL_NAME.into(),
                text,
            )
            .build(),
            None => mapper::name_label(element),
        };
        Ok(mapper::node_builder(ctx, element)
            .child(head)
            .child(mapper::compartment(element, "body", Vec::new()))
            .build())
    }
}

/// Lifelines move along the interaction's horizontal axis only: they can be
/// repositioned, deleted and resized, but not moved to another interaction.
#[derive(Debug, Default)]
pub struct LifelineManifest;

impl ElementManifest for LifelineManifest {
    fn uml_type(&self) -> UmlType {
        UmlType::Lifeline
    }

    fn configure(&self, binder: &mut ElementBinder) -> Result<(), RegistryError> {
        let key = binder.type_key(UmlType::Lifeline);
        binder.bind_mapper(UmlType::Lifeline, LifelineMapper)?;
        binder.bind_configuration(
            NodeConfiguration::new(key)
                .graph_containable()
                .with_flags(true, true, true, false),
        )?;
        binder.bind_create_handler(NodeOperationHandler::new(
            key,
            CreateNodeArgument::new(&[UmlType::Interaction], |model, interaction, name| {
                model.create_lifeline(interaction, name)
            }),
        ))?;
        binder.bind_label_edit(UmlType::Lifeline, NamedElementLabelEditHandler);
        binder.bind_property_provider(UmlType::Lifeline, NamedElementPropertyProvider::new());
        Ok(())
    }
}

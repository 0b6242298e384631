//! Node rendering shared by classifiers.

use stencil_core::{
    gmodel::{GModelElement, css},
    semantic::Element,
    uml::UmlType,
};

use crate::{
    context::ProviderContext,
    mapper::{self, GModelMapper, MappingError},
};

/// Draws a classifier as a header (optional keyword, then name) followed by
/// one compartment holding its features.
///
/// Abstract classes get their node rendered in italics.
#[derive(Debug, Clone)]
pub struct ClassifierMapper {
    uml_type: UmlType,
    keyword: Option<&'static str>,
    compartment: &'static str,
}

impl ClassifierMapper {
    pub fn new(uml_type: UmlType) -> Self {
        Self {
            uml_type,
            keyword: None,
            compartment: "attributes",
        }
    }

    pub fn with_keyword(mut self, keyword: &'static str) -> Self {
        self.keyword = Some(keyword);
        self
    }

    pub fn with_compartment(mut self, suffix: &'static str) -> Self {
        self.compartment = suffix;
        self
    }
}

impl GModelMapper for ClassifierMapper {
    fn map(
        &self,
        ctx: &ProviderContext<'_>,
        element: &Element,
    ) -> Result<GModelElement, MappingError> {
        mapper::expect_kind(element, self.uml_type)?;
        let features = ctx.map_children(element)?;

        let mut builder = mapper::node_builder(ctx, element);
        if element.is_abstract() == Some(true) {
            builder = builder.css_class(css::FONT_ITALIC);
        }
        Ok(builder
            .child(mapper::header(element, self.keyword))
            .child(mapper::compartment(element, self.compartment, features))
            .build())
    }
}

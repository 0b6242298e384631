//! Element creation from editor gestures.
//!
//! An [`OperationHandler`] answers two questions for one element type:
//! whether a create operation applies ([`OperationHandler::can_create`]) and,
//! if so, which command performs it ([`OperationHandler::handle`]). Handlers
//! read the model but never change it; the returned command does.
//!
//! A create request that does not fit the handler (wrong type key, ends of
//! the wrong metaclass, unknown ids) is not an error. The handler declines
//! and the host tries the next one or ignores the gesture.

use log::debug;

use stencil_core::{
    command::{Command, RecordingCommand},
    identifier::Id,
    semantic::{Element, Model, ModelError},
    uml::{TypeKey, UmlType},
};

use crate::context::ProviderContext;

/// A request to create an element.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOperation {
    /// Create a node inside `container`, or inside the model root when unset.
    Node {
        element_type: TypeKey,
        container: Option<Id>,
        name: Option<String>,
    },
    /// Create a relationship between two existing elements.
    Edge {
        element_type: TypeKey,
        source: Id,
        target: Id,
    },
}

impl CreateOperation {
    pub fn node(element_type: TypeKey, container: Option<Id>) -> Self {
        Self::Node {
            element_type,
            container,
            name: None,
        }
    }

    pub fn edge(element_type: TypeKey, source: Id, target: Id) -> Self {
        Self::Edge {
            element_type,
            source,
            target,
        }
    }

    /// Sets the name of a node to create. Ignored for edges.
    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        if let Self::Node { name, .. } = &mut self {
            *name = Some(value.into());
        }
        self
    }

    /// The type key of the element to create.
    pub fn element_type(&self) -> TypeKey {
        match self {
            Self::Node { element_type, .. } | Self::Edge { element_type, .. } => *element_type,
        }
    }
}

/// Creates elements of one type.
pub trait OperationHandler: Send + Sync {
    /// The type key this handler creates.
    fn element_type(&self) -> TypeKey;

    /// Returns true if `operation` can be performed in the current model.
    fn can_create(&self, ctx: &ProviderContext<'_>, operation: &CreateOperation) -> bool;

    /// Returns the command performing `operation`, or `None` when
    /// [`OperationHandler::can_create`] is false.
    fn handle(
        &self,
        ctx: &ProviderContext<'_>,
        operation: &CreateOperation,
    ) -> Option<Box<dyn Command>>;
}

/// Semantic construction of a relationship: `(model, source, target)`.
pub type EdgeFactory = fn(&mut Model, Id, Id) -> Result<Id, ModelError>;

/// Extra applicability check on the resolved ends of a relationship.
pub type EdgeValidator = fn(&Element, &Element) -> bool;

/// Constraints and construction of a relationship kind.
#[derive(Debug, Clone)]
pub struct CreateEdgeArgument {
    sources: Vec<UmlType>,
    targets: Vec<UmlType>,
    validator: Option<EdgeValidator>,
    create: EdgeFactory,
}

impl CreateEdgeArgument {
    pub fn new(sources: &[UmlType], targets: &[UmlType], create: EdgeFactory) -> Self {
        Self {
            sources: sources.to_vec(),
            targets: targets.to_vec(),
            validator: None,
            create,
        }
    }

    pub fn with_validator(mut self, validator: EdgeValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn sources(&self) -> &[UmlType] {
        &self.sources
    }

    pub fn targets(&self) -> &[UmlType] {
        &self.targets
    }

    /// Returns true if `source` and `target` are acceptable ends.
    pub fn accepts(&self, source: &Element, target: &Element) -> bool {
        source.uml_type().conforms_to_any(&self.sources)
            && target.uml_type().conforms_to_any(&self.targets)
            && self.validator.is_none_or(|validate| validate(source, target))
    }
}

/// Creates relationships through a [`CreateEdgeArgument`].
#[derive(Debug, Clone)]
pub struct EdgeOperationHandler {
    element_type: TypeKey,
    argument: CreateEdgeArgument,
}

impl EdgeOperationHandler {
    pub fn new(element_type: TypeKey, argument: CreateEdgeArgument) -> Self {
        Self {
            element_type,
            argument,
        }
    }

    fn ends(&self, ctx: &ProviderContext<'_>, operation: &CreateOperation) -> Option<(Id, Id)> {
        let CreateOperation::Edge {
            element_type,
            source,
            target,
        } = operation
        else {
            return None;
        };
        if *element_type != self.element_type {
            return None;
        }

        let model = ctx.model();
        let (Some(source_element), Some(target_element)) = (model.get(*source), model.get(*target))
        else {
            debug!(source:% = source, target:% = target; "Edge end not found");
            return None;
        };
        if !self.argument.accepts(source_element, target_element) {
            debug!(
                element_type:% = self.element_type,
                source_type:% = source_element.uml_type(),
                target_type:% = target_element.uml_type();
                "Edge ends not applicable"
            );
            return None;
        }
        Some((*source, *target))
    }
}

impl OperationHandler for EdgeOperationHandler {
    fn element_type(&self) -> TypeKey {
        self.element_type
    }

    fn can_create(&self, ctx: &ProviderContext<'_>, operation: &CreateOperation) -> bool {
        self.ends(ctx, operation).is_some()
    }

    fn handle(
        &self,
        ctx: &ProviderContext<'_>,
        operation: &CreateOperation,
    ) -> Option<Box<dyn Command>> {
        let (source, target) = self.ends(ctx, operation)?;
        let create = self.argument.create;
        let label = format!("Create {}", self.element_type.uml_type());
        Some(Box::new(RecordingCommand::new(label, move |model| {
            create(model, source, target)?;
            Ok(())
        })))
    }
}

/// Semantic construction of a node: `(model, container, name)`.
pub type NodeFactory = fn(&mut Model, Id, &str) -> Result<Id, ModelError>;

/// Constraints and construction of a node kind.
#[derive(Debug, Clone)]
pub struct CreateNodeArgument {
    containers: Vec<UmlType>,
    create: NodeFactory,
}

impl CreateNodeArgument {
    pub fn new(containers: &[UmlType], create: NodeFactory) -> Self {
        Self {
            containers: containers.to_vec(),
            create,
        }
    }

    pub fn containers(&self) -> &[UmlType] {
        &self.containers
    }
}

/// Creates nodes through a [`CreateNodeArgument`].
#[derive(Debug, Clone)]
pub struct NodeOperationHandler {
    element_type: TypeKey,
    argument: CreateNodeArgument,
}

impl NodeOperationHandler {
    pub fn new(element_type: TypeKey, argument: CreateNodeArgument) -> Self {
        Self {
            element_type,
            argument,
        }
    }

    fn container(&self, ctx: &ProviderContext<'_>, operation: &CreateOperation) -> Option<Id> {
        let CreateOperation::Node {
            element_type,
            container,
            ..
        } = operation
        else {
            return None;
        };
        if *element_type != self.element_type {
            return None;
        }

        let container = container.unwrap_or(ctx.model().root());
        let element = ctx.model().get(container)?;
        if element.uml_type().conforms_to_any(&self.argument.containers) {
            Some(container)
        } else {
            debug!(
                element_type:% = self.element_type,
                container_type:% = element.uml_type();
                "Container not applicable"
            );
            None
        }
    }
}

impl OperationHandler for NodeOperationHandler {
    fn element_type(&self) -> TypeKey {
        self.element_type
    }

    fn can_create(&self, ctx: &ProviderContext<'_>, operation: &CreateOperation) -> bool {
        self.container(ctx, operation).is_some()
    }

    fn handle(
        &self,
        ctx: &ProviderContext<'_>,
        operation: &CreateOperation,
    ) -> Option<Box<dyn Command>> {
        let container = self.container(ctx, operation)?;
        let uml_type = self.element_type.uml_type();
        let name = match operation {
            CreateOperation::Node {
                name: Some(name), ..
            } => name.clone(),
            _ => format!("New{uml_type}"),
        };
        let create = self.argument.create;
        Some(Box::new(RecordingCommand::new(
            format!("Create {uml_type}"),
            move |model| {
                create(model, container, &name)?;
                Ok(())
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{semantic::ElementKind, uml::Representation};

    fn usage_handler() -> EdgeOperationHandler {
        EdgeOperationHandler::new(
            TypeKey::new(Representation::Class, UmlType::Usage),
            CreateEdgeArgument::new(&[UmlType::NamedElement], &[UmlType::NamedElement], |m, s, t| {
                m.create_dependency(s, t, stencil_core::semantic::DependencyKind::Usage)
            }),
        )
    }

    fn class_handler() -> NodeOperationHandler {
        NodeOperationHandler::new(
            TypeKey::new(Representation::Class, UmlType::Class),
            CreateNodeArgument::new(&[UmlType::Package], |m, c, n| {
                m.create_packaged_element(c, ElementKind::Class { is_abstract: false }, Some(n))
            }),
        )
    }

    #[test]
    fn test_edge_handler_declines_other_type_keys() {
        let mut model = Model::new("m");
        let root = model.root();
        let a = model.create_packaged_element(root, ElementKind::Actor, Some("A")).unwrap();
        let ctx = ProviderContext::new(Representation::Class, &model);
        let handler = usage_handler();

        let wrong_key = CreateOperation::edge(
            TypeKey::new(Representation::Package, UmlType::Usage),
            a,
            a,
        );
        assert!(!handler.can_create(&ctx, &wrong_key));
        assert!(handler.handle(&ctx, &wrong_key).is_none());

        let node = CreateOperation::node(handler.element_type(), None);
        assert!(!handler.can_create(&ctx, &node));
    }

    #[test]
    fn test_edge_handler_declines_unknown_ends() {
        let model = Model::new("m");
        let ctx = ProviderContext::new(Representation::Class, &model);
        let handler = usage_handler();
        let op = CreateOperation::edge(handler.element_type(), Id::new("x"), model.root());
        assert!(!handler.can_create(&ctx, &op));
        assert!(handler.handle(&ctx, &op).is_none());
    }

    #[test]
    fn test_edge_handler_command_creates_relationship() {
        let mut model = Model::new("m");
        let root = model.root();
        let a = model.create_packaged_element(root, ElementKind::Actor, Some("A")).unwrap();
        let b = model.create_packaged_element(root, ElementKind::Interface, Some("B")).unwrap();
        let handler = usage_handler();
        let op = CreateOperation::edge(handler.element_type(), a, b);

        let mut command = {
            let ctx = ProviderContext::new(Representation::Class, &model);
            assert!(handler.can_create(&ctx, &op));
            handler.handle(&ctx, &op).unwrap()
        };
        assert_eq!(command.label(), "Create Usage");
        command.execute(&mut model).unwrap();

        let usages: Vec<_> = model.elements().filter(|e| e.uml_type() == UmlType::Usage).collect();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].source_ref(), Some(a));
        assert_eq!(usages[0].target_ref(), Some(b));
    }

    #[test]
    fn test_validator_can_decline() {
        let argument = CreateEdgeArgument::new(&[UmlType::Classifier], &[UmlType::Classifier], |m, s, t| {
            m.create_generalization(s, t)
        })
        .with_validator(|_, _| false);
        let a = Element::new(Id::new("A"), None, ElementKind::Class { is_abstract: false });
        assert!(!argument.accepts(&a, &a));
    }

    #[test]
    fn test_node_handler_defaults_to_model_root() {
        let mut model = Model::new("m");
        let handler = class_handler();
        let op = CreateOperation::node(handler.element_type(), None).with_name("Order");

        let mut command = {
            let ctx = ProviderContext::new(Representation::Class, &model);
            handler.handle(&ctx, &op).unwrap()
        };
        command.execute(&mut model).unwrap();

        let names: Vec<_> = model.children(model.root()).map(Element::label).collect();
        assert_eq!(names, vec!["Order"]);
    }

    #[test]
    fn test_node_handler_default_name() {
        let mut model = Model::new("m");
        let handler = class_handler();
        let op = CreateOperation::node(handler.element_type(), None);

        let mut command = {
            let ctx = ProviderContext::new(Representation::Class, &model);
            handler.handle(&ctx, &op).unwrap()
        };
        command.execute(&mut model).unwrap();
        assert!(model.elements().any(|e| e.name() == Some("NewClass")));
    }

    #[test]
    fn test_node_handler_declines_wrong_container() {
        let mut model = Model::new("m");
        let root = model.root();
        let a = model
            .create_packaged_element(root, ElementKind::Class { is_abstract: false }, Some("A"))
            .unwrap();
        let ctx = ProviderContext::new(Representation::Class, &model);
        let handler = class_handler();

        let op = CreateOperation::node(handler.element_type(), Some(a));
        assert!(!handler.can_create(&ctx, &op));
        assert!(handler.handle(&ctx, &op).is_none());
    }
}

//! The semantic model store.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{identifier::Id, uml::UmlType};

use super::{
    Element, ElementKind,
    change::{ChangeRecorder, ChangeSet},
};

/// Errors raised by semantic model operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("element `{0}` does not exist")]
    NotFound(Id),

    #[error("element `{id}` is a {found}, expected a {expected}")]
    UnexpectedKind {
        id: Id,
        expected: UmlType,
        found: UmlType,
    },

    #[error("the model root `{0}` cannot be removed")]
    RootRemoval(Id),

    #[error("element `{0}` is already part of the model")]
    DuplicateId(Id),

    #[error("inconsistent containment for element `{0}`")]
    InconsistentContainment(Id),

    #[error("element `{0}` is not reachable from the model root")]
    ContainmentCycle(Id),
}

/// Serialized form of a [`Model`]: the root id plus a flat element list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    pub root: Id,
    pub elements: Vec<Element>,
}

/// In-memory UML model.
///
/// Elements are kept in insertion order; containment order is the order of
/// each element's `owned` list. Mutations go through [`Model::create`],
/// [`Model::update`] and [`Model::remove`] so they can be recorded.
#[derive(Debug, Clone)]
pub struct Model {
    root: Id,
    elements: IndexMap<Id, Element>,
    next_index: usize,
    recorder: Option<ChangeRecorder>,
}

impl Model {
    /// Creates a model containing only a root `Model` element named `name`.
    pub fn new(name: &str) -> Self {
        let root = Id::generated("Model", 0);
        let mut elements = IndexMap::new();
        elements.insert(
            root,
            Element::new(root, Some(name.to_string()), ElementKind::Model),
        );
        Self {
            root,
            elements,
            next_index: 1,
            recorder: None,
        }
    }

    /// Builds a model from its serialized form, validating containment.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the root is missing or not a `Model`, an id
    /// is duplicated, an owner/owned reference is dangling or one-sided, an
    /// element is listed twice in an `owned` list, or the containment graph
    /// has a cycle detached from the root.
    pub fn from_document(document: ModelDocument) -> Result<Self, ModelError> {
        let mut elements = IndexMap::with_capacity(document.elements.len());
        for element in document.elements {
            let id = element.id();
            if elements.insert(id, element).is_some() {
                return Err(ModelError::DuplicateId(id));
            }
        }

        let root = elements
            .get(&document.root)
            .ok_or(ModelError::NotFound(document.root))?;
        if root.uml_type() != UmlType::Model {
            return Err(ModelError::UnexpectedKind {
                id: document.root,
                expected: UmlType::Model,
                found: root.uml_type(),
            });
        }

        for element in elements.values() {
            if let Some(owner_id) = element.owner() {
                let owner = elements
                    .get(&owner_id)
                    .ok_or(ModelError::NotFound(owner_id))?;
                if !owner.owned().contains(&element.id()) {
                    return Err(ModelError::InconsistentContainment(element.id()));
                }
            } else if element.id() != document.root {
                return Err(ModelError::InconsistentContainment(element.id()));
            }
            for child in element.owned() {
                let owned = elements.get(child).ok_or(ModelError::NotFound(*child))?;
                if owned.owner() != Some(element.id()) {
                    return Err(ModelError::InconsistentContainment(*child));
                }
            }
        }

        check_containment_tree(document.root, &elements)?;

        debug!(elements = elements.len(); "Model loaded from document");
        let next_index = elements.len();
        Ok(Self {
            root: document.root,
            elements,
            next_index,
            recorder: None,
        })
    }

    /// Converts the model into its serialized form.
    pub fn to_document(&self) -> ModelDocument {
        ModelDocument {
            root: self.root,
            elements: self.elements.values().cloned().collect(),
        }
    }

    /// Returns the id of the root `Model` element.
    pub fn root(&self) -> Id {
        self.root
    }

    /// Returns the element with the given id, if it exists.
    pub fn get(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns the element with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if no such element exists.
    pub fn element(&self, id: Id) -> Result<&Element, ModelError> {
        self.get(id).ok_or(ModelError::NotFound(id))
    }

    /// Returns the element with the given id, checking its metaclass.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] or [`ModelError::UnexpectedKind`].
    pub fn element_of(&self, id: Id, expected: UmlType) -> Result<&Element, ModelError> {
        let element = self.element(id)?;
        if element.is_kind_of(expected) {
            Ok(element)
        } else {
            Err(ModelError::UnexpectedKind {
                id,
                expected,
                found: element.uml_type(),
            })
        }
    }

    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    /// Iterates all elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates the direct children of `id` in containment order.
    ///
    /// Yields nothing if `id` does not exist.
    pub fn children(&self, id: Id) -> impl Iterator<Item = &Element> {
        self.get(id)
            .map(|element| element.owned())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get(*child))
    }

    /// Returns `id` and all its transitive children, depth-first pre-order.
    pub fn descendants(&self, id: Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(element) = self.get(current) else {
                continue;
            };
            result.push(current);
            stack.extend(element.owned().iter().rev().copied());
        }
        result
    }

    /// Returns the closest package (or model) containing `id`, including `id` itself.
    pub fn nearest_package(&self, id: Id) -> Option<Id> {
        let mut current = self.get(id);
        while let Some(element) = current {
            if element.is_kind_of(UmlType::Package) {
                return Some(element.id());
            }
            current = element.owner().and_then(|owner| self.get(owner));
        }
        None
    }

    /// Creates a new element contained in `owner` and returns its id.
    ///
    /// Containment rules are not checked here; callers constrain containers.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if `owner` does not exist.
    pub fn create(
        &mut self,
        owner: Id,
        name: Option<&str>,
        kind: ElementKind,
    ) -> Result<Id, ModelError> {
        if !self.contains(owner) {
            return Err(ModelError::NotFound(owner));
        }

        let id = self.next_id(kind.uml_type());
        let mut element = Element::new(id, name.map(str::to_string), kind);
        element.set_owner(Some(owner));

        self.touch(id);
        self.touch(owner);
        self.elements.insert(id, element);
        if let Some(container) = self.elements.get_mut(&owner) {
            container.owned_mut().push(id);
        }

        trace!(id:% = id, owner:% = owner; "Element created");
        Ok(id)
    }

    /// Applies `f` to the element with the given id.
    ///
    /// The element's id and containment cannot be changed through `f`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the element does not exist.
    pub fn update(&mut self, id: Id, f: impl FnOnce(&mut Element)) -> Result<(), ModelError> {
        if !self.contains(id) {
            return Err(ModelError::NotFound(id));
        }
        self.touch(id);
        if let Some(element) = self.elements.get_mut(&id) {
            f(element);
        }
        Ok(())
    }

    /// Removes the element, its contained elements, and every relationship
    /// whose ends point into the removed subtree.
    ///
    /// Optional references into the subtree (a property's type, the element a
    /// lifeline represents) are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the element does not exist and
    /// [`ModelError::RootRemoval`] for the model root.
    pub fn remove(&mut self, id: Id) -> Result<(), ModelError> {
        if id == self.root {
            return Err(ModelError::RootRemoval(id));
        }
        if !self.contains(id) {
            return Err(ModelError::NotFound(id));
        }

        let mut doomed: HashSet<Id> = self.descendants(id).into_iter().collect();
        // Relationships attached to doomed elements go too, transitively.
        loop {
            let dangling: Vec<Id> = self
                .elements
                .values()
                .filter(|e| e.is_relationship() && !doomed.contains(&e.id()))
                .filter(|e| {
                    e.source_ref().is_some_and(|s| doomed.contains(&s))
                        || e.target_ref().is_some_and(|t| doomed.contains(&t))
                })
                .map(Element::id)
                .collect();
            if dangling.is_empty() {
                break;
            }
            for relationship in dangling {
                doomed.extend(self.descendants(relationship));
            }
        }

        let ordered: Vec<Id> = self
            .elements
            .keys()
            .filter(|k| doomed.contains(*k))
            .copied()
            .collect();

        // Detach the doomed roots from surviving owners.
        let detached: Vec<(Id, Id)> = ordered
            .iter()
            .filter_map(|d| self.get(*d).and_then(|e| e.owner()).map(|o| (o, *d)))
            .filter(|(owner, _)| !doomed.contains(owner))
            .collect();
        for (owner, child) in detached {
            self.touch(owner);
            if let Some(container) = self.elements.get_mut(&owner) {
                container.owned_mut().retain(|c| *c != child);
            }
        }

        // Clear optional references held by survivors.
        let referrers: Vec<Id> = self
            .elements
            .values()
            .filter(|e| !doomed.contains(&e.id()))
            .filter(|e| e.references().iter().any(|r| doomed.contains(r)))
            .map(Element::id)
            .collect();
        for referrer in referrers {
            self.touch(referrer);
            if let Some(element) = self.elements.get_mut(&referrer) {
                for target in &ordered {
                    element.clear_optional_reference(*target);
                }
            }
        }

        for doomed_id in &ordered {
            self.touch(*doomed_id);
            self.elements.shift_remove(doomed_id);
        }

        debug!(id:% = id, removed = ordered.len(); "Element removed");
        Ok(())
    }

    /// Runs `f` while recording every element it touches.
    ///
    /// Recordings nest: an inner recording is also merged into the outer one.
    /// The change set is returned even if `f` fails, so callers can roll back
    /// partial work with [`Model::apply_changes`].
    pub fn record<T, E>(
        &mut self,
        f: impl FnOnce(&mut Model) -> Result<T, E>,
    ) -> (Result<T, E>, ChangeSet) {
        let outer = self.recorder.replace(ChangeRecorder::default());
        let result = f(self);
        let changes = self
            .recorder
            .take()
            .map(ChangeRecorder::finish)
            .unwrap_or_default();
        if let Some(mut outer) = outer {
            outer.merge(&changes);
            self.recorder = Some(outer);
        }
        (result, changes)
    }

    /// Restores every element in `changes` to its recorded state and returns
    /// the inverse change set.
    ///
    /// Applying the returned set restores the state before this call, which
    /// is how redo follows undo.
    pub fn apply_changes(&mut self, changes: ChangeSet) -> ChangeSet {
        let mut inverse = IndexMap::new();
        for (id, before) in changes.into_entries() {
            self.touch(id);
            let current = match before {
                Some(element) => self.elements.insert(id, element),
                None => self.elements.shift_remove(&id),
            };
            inverse.insert(id, current);
        }
        ChangeSet::from_entries(inverse)
    }

    fn touch(&mut self, id: Id) {
        if let Some(recorder) = self.recorder.as_mut() {
            let elements = &self.elements;
            recorder.note(id, || elements.get(&id).cloned());
        }
    }

    fn next_id(&mut self, uml_type: UmlType) -> Id {
        loop {
            let candidate = Id::generated(uml_type.name(), self.next_index);
            self.next_index += 1;
            if !self.contains(candidate) {
                return candidate;
            }
        }
    }
}

impl PartialEq for Model {
    /// Two models are equal when they hold the same root and elements,
    /// regardless of insertion order or recording state.
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.elements == other.elements
    }
}

/// Walks the containment tree from `root` and checks that every element is
/// reached exactly once.
fn check_containment_tree(root: Id, elements: &IndexMap<Id, Element>) -> Result<(), ModelError> {
    let mut visited = HashSet::with_capacity(elements.len());
    visited.insert(root);
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(element) = elements.get(&id) else {
            return Err(ModelError::NotFound(id));
        };
        for child in element.owned() {
            if !visited.insert(*child) {
                return Err(ModelError::InconsistentContainment(*child));
            }
            stack.push(*child);
        }
    }

    match elements.keys().find(|id| !visited.contains(*id)) {
        Some(unreached) => Err(ModelError::ContainmentCycle(*unreached)),
        None => Ok(()),
    }
}

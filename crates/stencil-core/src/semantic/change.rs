//! Change recording for reversible model mutations.
//!
//! While a [`Model`](super::Model) is recording, the first mutation of every
//! element stores that element's previous state. The resulting [`ChangeSet`]
//! is enough to restore the model, and applying it yields the inverse set,
//! which is how commands implement undo and redo.

use indexmap::IndexMap;

use crate::identifier::Id;

use super::Element;

/// The before-state of every element touched during one recording.
///
/// `None` means the element did not exist before the recording started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    before: IndexMap<Id, Option<Element>>,
}

impl ChangeSet {
    /// Returns true if no element was touched.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
    }

    /// Number of touched elements.
    pub fn len(&self) -> usize {
        self.before.len()
    }

    /// Ids of the touched elements, in first-touch order.
    pub fn touched(&self) -> impl Iterator<Item = Id> + '_ {
        self.before.keys().copied()
    }

    /// Ids of elements that did not exist before the recording.
    pub fn created(&self) -> impl Iterator<Item = Id> + '_ {
        self.before
            .iter()
            .filter(|(_, before)| before.is_none())
            .map(|(id, _)| *id)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (Id, Option<&Element>)> + '_ {
        self.before.iter().map(|(id, before)| (*id, before.as_ref()))
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (Id, Option<Element>)> {
        self.before.into_iter()
    }

    pub(crate) fn from_entries(entries: IndexMap<Id, Option<Element>>) -> Self {
        Self { before: entries }
    }
}

/// Collects before-states while a recording is active.
#[derive(Debug, Clone, Default)]
pub(crate) struct ChangeRecorder {
    before: IndexMap<Id, Option<Element>>,
}

impl ChangeRecorder {
    /// Stores `state` as the before-state of `id` unless one is already stored.
    pub(crate) fn note(&mut self, id: Id, state: impl FnOnce() -> Option<Element>) {
        self.before.entry(id).or_insert_with(state);
    }

    /// Merges an inner recording into this one, keeping the earlier states.
    pub(crate) fn merge(&mut self, inner: &ChangeSet) {
        for (id, before) in inner.entries() {
            self.before.entry(id).or_insert_with(|| before.cloned());
        }
    }

    pub(crate) fn finish(self) -> ChangeSet {
        ChangeSet::from_entries(self.before)
    }
}

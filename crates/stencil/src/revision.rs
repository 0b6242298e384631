//! Model revision history.
//!
//! A [`Timeline`] records snapshots of a semantic model, each stamped with
//! the time it was taken and a message. Any snapshot can be restored into a
//! fresh [`Model`], and the whole timeline can be exported to JSON and
//! imported again.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stencil_core::semantic::{Model, ModelDocument, ModelError};

/// Errors raised while restoring or importing revisions.
#[derive(Debug, Error)]
pub enum RevisionError {
    #[error("no snapshot with id {0}")]
    UnknownSnapshot(u64),

    #[error("snapshot ids must increase, found {id} after {previous}")]
    UnorderedSnapshot { id: u64, previous: u64 },

    #[error("snapshot {id} cannot be restored: {err}")]
    Restore {
        id: u64,
        #[source]
        err: ModelError,
    },

    #[error("malformed timeline: {0}")]
    Format(#[from] serde_json::Error),
}

/// The state of a model at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    id: u64,
    /// Serialized as RFC 3339.
    timestamp: DateTime<Utc>,
    message: String,
    document: ModelDocument,
}

impl Snapshot {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn document(&self) -> &ModelDocument {
        &self.document
    }
}

/// Ordered list of model snapshots, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of `model` and appends it to the timeline.
    pub fn record(&mut self, model: &Model, message: impl Into<String>) -> &Snapshot {
        let id = self.snapshots.last().map_or(1, |last| last.id + 1);
        let snapshot = Snapshot {
            id,
            timestamp: Utc::now(),
            message: message.into(),
            document: model.to_document(),
        };
        info!(id, elements = snapshot.document.elements.len(); "Recorded model snapshot");
        self.snapshots.push(snapshot);
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn get(&self, id: u64) -> Option<&Snapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Rebuilds the model captured by snapshot `id`.
    ///
    /// The stored document is validated like a freshly loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`RevisionError::UnknownSnapshot`] for an unknown id and
    /// [`RevisionError::Restore`] if the stored document is invalid.
    pub fn restore(&self, id: u64) -> Result<Model, RevisionError> {
        let snapshot = self.get(id).ok_or(RevisionError::UnknownSnapshot(id))?;
        let model = Model::from_document(snapshot.document.clone())
            .map_err(|err| RevisionError::Restore { id, err })?;
        debug!(id, message = snapshot.message.as_str(); "Restored model snapshot");
        Ok(model)
    }

    /// Exports the timeline as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RevisionError::Format`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RevisionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Imports a timeline previously written by [`Timeline::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`RevisionError::Format`] for malformed JSON and
    /// [`RevisionError::UnorderedSnapshot`] if snapshot ids do not strictly
    /// increase.
    pub fn from_json(source: &str) -> Result<Self, RevisionError> {
        let timeline: Self = serde_json::from_str(source)?;
        for pair in timeline.snapshots.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(RevisionError::UnorderedSnapshot {
                    id: pair[1].id,
                    previous: pair[0].id,
                });
            }
        }
        debug!(snapshots = timeline.len(); "Timeline imported");
        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use stencil_core::semantic::ElementKind;

    use super::*;

    fn model_with_classes(names: &[&str]) -> Model {
        let mut model = Model::new("shop");
        let root = model.root();
        for name in names {
            model
                .create(root, Some(*name), ElementKind::Class { is_abstract: false })
                .unwrap();
        }
        model
    }

    #[test]
    fn test_record_assigns_increasing_ids() {
        let mut timeline = Timeline::new();
        assert!(timeline.latest().is_none());

        let first = timeline.record(&model_with_classes(&["A"]), "initial").id();
        let second = timeline
            .record(&model_with_classes(&["A", "B"]), "add B")
            .id();

        assert_eq!((first, second), (1, 2));
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.latest().unwrap().message(), "add B");
        assert!(timeline.get(1).unwrap().timestamp() <= timeline.get(2).unwrap().timestamp());
    }

    #[test]
    fn test_restore_returns_recorded_state() {
        let mut timeline = Timeline::new();
        let mut model = model_with_classes(&["A"]);
        timeline.record(&model, "initial");

        let root = model.root();
        model
            .create(root, Some("B"), ElementKind::Interface)
            .unwrap();
        timeline.record(&model, "add interface");

        let restored = timeline.restore(1).unwrap();
        assert_eq!(restored, model_with_classes(&["A"]));
        assert_eq!(timeline.restore(2).unwrap(), model);
        assert!(matches!(
            timeline.restore(7),
            Err(RevisionError::UnknownSnapshot(7))
        ));
    }

    #[test]
    fn test_export_import_preserves_snapshots() {
        let mut timeline = Timeline::new();
        timeline.record(&model_with_classes(&["A"]), "initial");
        timeline.record(&model_with_classes(&["A", "B"]), "add B");

        let json = timeline.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let stamp = value["snapshots"][0]["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());

        let imported = Timeline::from_json(&json).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported.get(2).unwrap().message(), "add B");
        assert_eq!(
            imported.get(1).unwrap().timestamp(),
            timeline.get(1).unwrap().timestamp()
        );
        assert_eq!(imported.restore(2).unwrap(), model_with_classes(&["A", "B"]));
    }

    #[test]
    fn test_import_rejects_unordered_ids() {
        let json = r#"{"snapshots": [
            {"id": 2, "timestamp": "2026-01-01T10:00:00Z", "message": "b",
             "document": {"root": "m", "elements": [{"id": "m", "type": "Model"}]}},
            {"id": 2, "timestamp": "2026-01-01T11:00:00Z", "message": "c",
             "document": {"root": "m", "elements": [{"id": "m", "type": "Model"}]}}
        ]}"#;
        assert!(matches!(
            Timeline::from_json(json),
            Err(RevisionError::UnorderedSnapshot { id: 2, previous: 2 })
        ));
        assert!(matches!(
            Timeline::from_json("{\"snapshots\": [}"),
            Err(RevisionError::Format(_))
        ));
    }

    #[test]
    fn test_restore_validates_stored_document() {
        let json = r#"{"snapshots": [
            {"id": 1, "timestamp": "2026-01-01T10:00:00+02:00", "message": "broken",
             "document": {"root": "m", "elements": [
                {"id": "m", "type": "Model"},
                {"id": "A", "owner": "m", "type": "Class"}
             ]}}
        ]}"#;
        let timeline = Timeline::from_json(json).unwrap();
        assert!(matches!(
            timeline.restore(1),
            Err(RevisionError::Restore { id: 1, err: ModelError::InconsistentContainment(_) })
        ));
    }
}

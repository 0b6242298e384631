//! Reversible model commands.
//!
//! Bindings never mutate the [`Model`] directly: operation handlers, property
//! providers and label-edit handlers return a [`Command`] that the host
//! executes and keeps on its own undo stack.
//!
//! [`RecordingCommand`] covers every mutation the bindings need. It runs a
//! model operation under change recording and undoes it by restoring the
//! recorded before-states, so operations do not have to provide an inverse.
//!
//! ```
//! # use stencil_core::command::{Command, RecordingCommand};
//! # use stencil_core::semantic::{ElementKind, Model};
//! let mut model = Model::new("m");
//! let root = model.root();
//! let mut command = RecordingCommand::new("Create class", move |model| {
//!     model.create(root, Some("A"), ElementKind::Class { is_abstract: false })?;
//!     Ok(())
//! });
//!
//! command.execute(&mut model).unwrap();
//! assert_eq!(model.len(), 2);
//! command.undo(&mut model).unwrap();
//! assert_eq!(model.len(), 1);
//! command.redo(&mut model).unwrap();
//! assert_eq!(model.len(), 2);
//! ```

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    identifier::Id,
    semantic::{ChangeSet, Model, ModelError},
};

/// Errors raised while executing, undoing or redoing a command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("command `{0}` was already executed")]
    AlreadyExecuted(String),

    #[error("command `{0}` has not been executed")]
    NotExecuted(String),

    #[error("command `{0}` has not been undone")]
    NotUndone(String),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// A reversible change to the semantic model.
pub trait Command: fmt::Debug + Send {
    /// Short human-readable description, shown in undo menus.
    fn label(&self) -> &str;

    /// Applies the change.
    ///
    /// # Errors
    ///
    /// On error the model is left as it was before the call.
    fn execute(&mut self, model: &mut Model) -> Result<(), CommandError>;

    /// Reverts a previous [`Command::execute`] or [`Command::redo`].
    fn undo(&mut self, model: &mut Model) -> Result<(), CommandError>;

    /// Re-applies the change after [`Command::undo`].
    fn redo(&mut self, model: &mut Model) -> Result<(), CommandError>;

    /// Ids of the elements the last execution touched.
    fn affected(&self) -> Vec<Id> {
        Vec::new()
    }

    /// Returns true if executing this command never changes the model.
    fn is_noop(&self) -> bool {
        false
    }
}

/// A model operation run by [`RecordingCommand`].
pub type ModelOperation = Box<dyn FnOnce(&mut Model) -> Result<(), ModelError> + Send>;

enum State {
    Pending(ModelOperation),
    Executed(ChangeSet),
    Undone(ChangeSet),
    Failed,
}

/// Runs a model operation under change recording.
pub struct RecordingCommand {
    label: String,
    state: State,
}

impl RecordingCommand {
    pub fn new(
        label: impl Into<String>,
        operation: impl FnOnce(&mut Model) -> Result<(), ModelError> + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            state: State::Pending(Box::new(operation)),
        }
    }

    /// The elements created by the last execution or redo.
    pub fn created(&self) -> Vec<Id> {
        match &self.state {
            State::Executed(changes) => changes.created().collect(),
            _ => Vec::new(),
        }
    }
}

impl Command for RecordingCommand {
    fn label(&self) -> &str {
        &self.label
    }

    fn execute(&mut self, model: &mut Model) -> Result<(), CommandError> {
        let operation = match std::mem::replace(&mut self.state, State::Failed) {
            State::Pending(operation) => operation,
            other => {
                self.state = other;
                return Err(CommandError::AlreadyExecuted(self.label.clone()));
            }
        };

        let (result, changes) = model.record(operation);
        match result {
            Ok(()) => {
                debug!(command = self.label.as_str(), touched = changes.len(); "Command executed");
                self.state = State::Executed(changes);
                Ok(())
            }
            Err(err) => {
                warn!(command = self.label.as_str(), err:% = err; "Command failed, reverting");
                model.apply_changes(changes);
                Err(err.into())
            }
        }
    }

    fn undo(&mut self, model: &mut Model) -> Result<(), CommandError> {
        match std::mem::replace(&mut self.state, State::Failed) {
            State::Executed(changes) => {
                self.state = State::Undone(model.apply_changes(changes));
                debug!(command = self.label.as_str(); "Command undone");
                Ok(())
            }
            other => {
                self.state = other;
                Err(CommandError::NotExecuted(self.label.clone()))
            }
        }
    }

    fn redo(&mut self, model: &mut Model) -> Result<(), CommandError> {
        match std::mem::replace(&mut self.state, State::Failed) {
            State::Undone(changes) => {
                self.state = State::Executed(model.apply_changes(changes));
                debug!(command = self.label.as_str(); "Command redone");
                Ok(())
            }
            other => {
                self.state = other;
                Err(CommandError::NotUndone(self.label.clone()))
            }
        }
    }

    fn affected(&self) -> Vec<Id> {
        match &self.state {
            State::Executed(changes) | State::Undone(changes) => changes.touched().collect(),
            State::Pending(_) | State::Failed => Vec::new(),
        }
    }
}

impl fmt::Debug for RecordingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Pending(_) => "pending",
            State::Executed(_) => "executed",
            State::Undone(_) => "undone",
            State::Failed => "failed",
        };
        f.debug_struct("RecordingCommand")
            .field("label", &self.label)
            .field("state", &state)
            .finish()
    }
}

/// A command that does nothing.
///
/// Returned for requests that are valid but have no effect, such as updating
/// a property the provider does not manage.
#[derive(Debug, Clone)]
pub struct NoopCommand {
    label: String,
}

impl NoopCommand {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Command for NoopCommand {
    fn label(&self) -> &str {
        &self.label
    }

    fn execute(&mut self, _model: &mut Model) -> Result<(), CommandError> {
        Ok(())
    }

    fn undo(&mut self, _model: &mut Model) -> Result<(), CommandError> {
        Ok(())
    }

    fn redo(&mut self, _model: &mut Model) -> Result<(), CommandError> {
        Ok(())
    }

    fn is_noop(&self) -> bool {
        true
    }
}

//! Semantic UML model types.
//!
//! This module contains the in-memory UML model the element bindings read
//! from and, through commands, mutate. It stands in for the metamodel store
//! of a full modeling tool and deliberately keeps only what the bindings need.
//!
//! # Pipeline Position
//!
//! ```text
//! Semantic Model (these types)
//!     ↓ GModel mappers
//! Graphical Model (gmodel)
//!     ↓ host transport
//! Diagram editor client
//!
//! Editor gesture
//!     ↓ operation handlers / property providers
//! Command
//!     ↓ host execute / undo
//! Semantic Model (these types)
//! ```
//!
//! # Organization
//!
//! - [`element`] - [`Element`], [`ElementKind`] and per-kind payloads
//! - [`model`] - [`Model`], the element store with containment and change recording
//! - [`change`] - [`ChangeSet`], the recorded before-state used for undo/redo
//! - [`factory`] - UML factory operations (`create_generalization`, ...)

pub mod change;
pub mod element;
pub mod factory;
pub mod model;

pub use change::ChangeSet;
pub use element::*;
pub use factory::DependencyKind;
pub use model::{Model, ModelDocument, ModelError};

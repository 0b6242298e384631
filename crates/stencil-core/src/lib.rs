//! Stencil Core Types and Definitions
//!
//! This crate provides the foundational types shared by every Stencil element
//! binding. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **UML types**: Metaclasses, diagram representations and type keys ([`uml`] module)
//! - **Semantic**: The in-memory UML model the bindings read and mutate ([`semantic`] module)
//! - **Commands**: Reversible model mutations ([`command`] module)
//! - **Graphical model**: Node/edge descriptions sent to the editor ([`gmodel`] module)
//! - **Geometry**: Node size hints ([`geometry`] module)

pub mod command;
pub mod geometry;
pub mod gmodel;
pub mod identifier;
pub mod semantic;
pub mod uml;

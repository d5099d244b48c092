//! Shared foundational types used across the hintc toolchain.
//!
//! This crate provides the minimal program model the processor needs: erased
//! type shapes with their signature encoding, method/constructor declarations
//! with their canonical descriptors, and the annotated elements a collaborator
//! hands to the processor.

#![warn(missing_docs)]

pub mod declaration;
pub mod element;
pub mod shape;

pub use declaration::{Declaration, CONSTRUCTOR_NAME};
pub use element::{Element, ElementKind};
pub use shape::{ParseTypeShapeError, PrimitiveKind, TypeShape};

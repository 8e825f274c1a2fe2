//! Panel data structures.
//!
//! This module provides the core data structures for declaring and
//! managing a settings panel:
//!
//! - [`field`] - Field definitions and per-field value state
//! - [`fields`] - Ordered, unique-keyed field collection
//! - [`panel`] - The live panel instance and its lifecycle
//! - [`value`] - Dynamically typed field values

/// Field definitions and per-field value state.
pub mod field;

/// Ordered, unique-keyed field collection.
pub mod fields;

/// The live panel instance and its lifecycle.
pub mod panel;

/// Dynamically typed field values.
pub mod value;

pub use field::{Field, FieldKind, LabelPos, Section};
pub use fields::FieldSet;
pub use panel::{Events, Panel, PanelOptions};
pub use value::Value;

//! UI components and editors.

/// Per-field editor views and input collection.
pub mod editors;

/// Panel dialog assembly and layer management.
pub mod panel;

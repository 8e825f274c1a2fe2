//! # cfgpanel
//!
//! A Cursive-based TUI settings panel library with persistent, typed
//! configuration values.
//!
//! Declare a set of labeled, typed fields, and cfgpanel renders an
//! interactive terminal panel where the user edits and saves them.
//! Values persist through pluggable stores (JSON/TOML files or
//! in-memory) and are accessible one by one through type-checked
//! `get`/`set`.
//!
//! ## Features
//!
//! - TUI interface built with [Cursive](https://github.com/gyscos/cursive)
//! - Ten field kinds: text, textarea, int, unsigned, float, checkbox,
//!   radio, select, hidden, button
//! - Labels with configurable placement and section headings
//! - Lifecycle callbacks: init, open, save, close, reset
//! - JSON Schema driven field generation for typed configs
//! - Multi-format persistence: TOML and JSON files, with automatic
//!   backup before saving changes
//! - Type validation with bounds and option-membership checks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cfgpanel::{Field, FieldKind, FieldSet, FileStore, Panel, PanelOptions};
//!
//! # fn main() -> cfgpanel::Result<()> {
//! let fields = FieldSet::new()
//!     .with(Field::new("host", "Host", FieldKind::text(Some("localhost"))))?
//!     .with(Field::new("port", "Port", FieldKind::unsigned(Some(80), Some(1), Some(65535))))?
//!     .with(Field::new("tls", "Use TLS", FieldKind::checkbox(false)))?;
//!
//! let store = Arc::new(FileStore::new("app.toml"));
//! let mut panel = Panel::new(PanelOptions::new("app", "Server Settings", fields), store)?;
//!
//! // Load stored values, show the panel, block until dismissed.
//! panel.open()?;
//!
//! let host = panel.get("host")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Field definitions, values, and the panel instance
//! - [`store`] - Persistent value stores
//! - [`schema`] - JSON Schema to field-set conversion
//! - [`run`] - Editor entry points for typed configs
//! - [`ui`] - Panel rendering and event handling

/// Field definitions, values, and the panel instance.
pub mod data;

/// Error types and result definitions.
pub mod error;

/// Editor entry points for typed configs and schema files.
pub mod run;

/// JSON Schema to field-set conversion.
pub mod schema;

/// Persistent value stores.
pub mod store;

/// Panel rendering and event handling.
pub mod ui;

pub use cursive;

pub use data::{
    Events, Field, FieldKind, FieldSet, LabelPos, Panel, PanelOptions, Section, Value,
};
pub use error::{PanelError, Result};
pub use run::{edit, edit_with_schema};
pub use store::{FileStore, MemStore, Store, ValueMap};

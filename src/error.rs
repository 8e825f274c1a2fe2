//! Error types and result definitions for panel operations.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors produced by panel construction, value access, and storage.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A value did not match the field's declared type.
    #[error("type mismatch at `{key}`: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Field key the value was destined for.
        key: String,
        /// Human-readable description of the expected type.
        expected: String,
        /// Human-readable rendition of the offending value.
        actual: String,
    },

    /// No field is registered under the given key.
    #[error("unknown field key `{0}`")]
    UnknownKey(String),

    /// A field with the same key was already registered.
    #[error("duplicate field key `{0}`")]
    DuplicateKey(String),

    /// A numeric value fell outside the field's declared bounds.
    #[error("value {value} for `{key}` is outside {min}..={max}")]
    OutOfRange {
        /// Field key.
        key: String,
        /// The rejected value.
        value: String,
        /// Lower bound, or "-inf" when unbounded.
        min: String,
        /// Upper bound, or "+inf" when unbounded.
        max: String,
    },

    /// A choice value is not one of the field's options.
    #[error("`{value}` is not an option of `{key}`")]
    UnknownOption {
        /// Field key.
        key: String,
        /// The rejected option.
        value: String,
    },

    /// A field definition is internally inconsistent.
    #[error("invalid definition for `{key}`: {reason}")]
    InvalidField {
        /// Field key (or `id` for panel-level problems).
        key: String,
        /// What is wrong with the definition.
        reason: String,
    },

    /// The store file extension is not a supported format.
    #[error("unsupported config file extension: {0:?}")]
    UnsupportedFormat(String),

    /// A schema construct could not be converted into a field.
    #[error("schema error at `{path}`: {reason}")]
    Schema {
        /// JSON pointer-ish location inside the schema document.
        path: String,
        /// Why the construct was rejected.
        reason: String,
    },

    /// The theme text was rejected by the UI backend.
    #[error("invalid theme: {0}")]
    Theme(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parse failure.
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization failure.
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

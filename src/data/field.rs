//! Field definitions: one entry per user-editable configuration value.

use std::{fmt, sync::Arc};

use cursive::Cursive;
use serde_json::Value as Json;

use crate::{
    data::value::Value,
    error::{PanelError, Result},
};

/// Callback invoked when a button field is activated.
pub type ClickCallback = Arc<dyn Fn(&mut Cursive) + Send + Sync>;

/// Placement of a field's label relative to its editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPos {
    /// Label to the left of the editor (the default).
    #[default]
    Left,
    /// Label to the right of the editor.
    Right,
    /// Label on its own line above the editor.
    Above,
    /// Label on its own line below the editor.
    Below,
}

/// Section heading rendered before a field, starting a new visual group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Group heading.
    pub heading: String,
    /// Optional smaller line under the heading.
    pub subheading: Option<String>,
}

/// One-of-N choice state shared by radio and select fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceItem {
    /// List of option labels.
    pub options: Vec<String>,
    /// Selected option index.
    pub value: Option<usize>,
    /// Default option index.
    pub default: Option<usize>,
}

impl ChoiceItem {
    /// Build a choice over the given options with an optional default index.
    pub fn new(options: &[&str], default: Option<usize>) -> Self {
        ChoiceItem {
            options: options.iter().map(|s| s.to_string()).collect(),
            value: None,
            default,
        }
    }

    /// Get the currently selected option as string, if any.
    pub fn value_str(&self) -> Option<&str> {
        self.value
            .and_then(|idx| self.options.get(idx).map(String::as_str))
    }

    /// Get the default option as string, if any.
    pub fn default_str(&self) -> Option<&str> {
        self.default
            .and_then(|idx| self.options.get(idx).map(String::as_str))
    }

    /// Selected option, falling back to the default.
    pub fn current_str(&self) -> Option<&str> {
        self.value_str().or_else(|| self.default_str())
    }

    /// Update the selection from a [`Value`].
    ///
    /// Accepts a string matching one of the options, or a numeric index.
    pub fn select(&mut self, value: &Value, key: &str) -> Result<()> {
        match value {
            Value::Str(s) => {
                if let Some(idx) = self.options.iter().position(|o| o == s) {
                    self.value = Some(idx);
                    Ok(())
                } else {
                    Err(PanelError::UnknownOption {
                        key: key.to_string(),
                        value: s.clone(),
                    })
                }
            }
            Value::Int(i) if *i >= 0 => self.select_index(*i as usize, key),
            Value::Uint(u) => self.select_index(*u as usize, key),
            other => Err(PanelError::TypeMismatch {
                key: key.to_string(),
                expected: "option name or index".to_string(),
                actual: other.to_string(),
            }),
        }
    }

    fn select_index(&mut self, idx: usize, key: &str) -> Result<()> {
        if idx < self.options.len() {
            self.value = Some(idx);
            Ok(())
        } else {
            Err(PanelError::UnknownOption {
                key: key.to_string(),
                value: idx.to_string(),
            })
        }
    }
}

/// Value storage and type information for one field.
#[derive(Clone)]
pub enum FieldKind {
    /// Single-line string with optional default.
    Text {
        /// Current value.
        value: Option<String>,
        /// Declared default.
        default: Option<String>,
    },
    /// Multi-line string with optional default.
    Textarea {
        /// Current value.
        value: Option<String>,
        /// Declared default.
        default: Option<String>,
    },
    /// Signed integer with optional bounds.
    Int {
        /// Current value.
        value: Option<i64>,
        /// Declared default.
        default: Option<i64>,
        /// Inclusive lower bound.
        min: Option<i64>,
        /// Inclusive upper bound.
        max: Option<i64>,
    },
    /// Unsigned integer with optional bounds.
    Unsigned {
        /// Current value.
        value: Option<u64>,
        /// Declared default.
        default: Option<u64>,
        /// Inclusive lower bound.
        min: Option<u64>,
        /// Inclusive upper bound.
        max: Option<u64>,
    },
    /// Floating-point number with optional bounds.
    Float {
        /// Current value.
        value: Option<f64>,
        /// Declared default.
        default: Option<f64>,
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
    },
    /// Boolean with default.
    Checkbox {
        /// Current value.
        value: bool,
        /// Declared default.
        default: bool,
    },
    /// One-of-N choice rendered as a radio group.
    Radio(ChoiceItem),
    /// One-of-N choice rendered as a list selector.
    Select(ChoiceItem),
    /// A literal value persisted but never rendered.
    Hidden {
        /// The stored literal.
        value: Value,
    },
    /// A labeled action; never persisted.
    Button {
        /// Click handler, invoked with the running UI.
        on_click: ClickCallback,
    },
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text { value, default } => f
                .debug_struct("Text")
                .field("value", value)
                .field("default", default)
                .finish(),
            FieldKind::Textarea { value, default } => f
                .debug_struct("Textarea")
                .field("value", value)
                .field("default", default)
                .finish(),
            FieldKind::Int {
                value,
                default,
                min,
                max,
            } => f
                .debug_struct("Int")
                .field("value", value)
                .field("default", default)
                .field("min", min)
                .field("max", max)
                .finish(),
            FieldKind::Unsigned {
                value,
                default,
                min,
                max,
            } => f
                .debug_struct("Unsigned")
                .field("value", value)
                .field("default", default)
                .field("min", min)
                .field("max", max)
                .finish(),
            FieldKind::Float {
                value,
                default,
                min,
                max,
            } => f
                .debug_struct("Float")
                .field("value", value)
                .field("default", default)
                .field("min", min)
                .field("max", max)
                .finish(),
            FieldKind::Checkbox { value, default } => f
                .debug_struct("Checkbox")
                .field("value", value)
                .field("default", default)
                .finish(),
            FieldKind::Radio(c) => f.debug_tuple("Radio").field(c).finish(),
            FieldKind::Select(c) => f.debug_tuple("Select").field(c).finish(),
            FieldKind::Hidden { value } => {
                f.debug_struct("Hidden").field("value", value).finish()
            }
            FieldKind::Button { .. } => f.write_str("Button"),
        }
    }
}

impl FieldKind {
    /// Single-line text field.
    pub fn text(default: Option<&str>) -> Self {
        FieldKind::Text {
            value: None,
            default: default.map(str::to_string),
        }
    }

    /// Multi-line text field.
    pub fn textarea(default: Option<&str>) -> Self {
        FieldKind::Textarea {
            value: None,
            default: default.map(str::to_string),
        }
    }

    /// Signed integer field with optional inclusive bounds.
    pub fn int(default: Option<i64>, min: Option<i64>, max: Option<i64>) -> Self {
        FieldKind::Int {
            value: None,
            default,
            min,
            max,
        }
    }

    /// Unsigned integer field with optional inclusive bounds.
    pub fn unsigned(default: Option<u64>, min: Option<u64>, max: Option<u64>) -> Self {
        FieldKind::Unsigned {
            value: None,
            default,
            min,
            max,
        }
    }

    /// Floating-point field with optional inclusive bounds.
    pub fn float(default: Option<f64>, min: Option<f64>, max: Option<f64>) -> Self {
        FieldKind::Float {
            value: None,
            default,
            min,
            max,
        }
    }

    /// Boolean field.
    pub fn checkbox(default: bool) -> Self {
        FieldKind::Checkbox {
            value: default,
            default,
        }
    }

    /// Radio-group choice field.
    pub fn radio(options: &[&str], default: Option<usize>) -> Self {
        FieldKind::Radio(ChoiceItem::new(options, default))
    }

    /// List-selector choice field.
    pub fn select(options: &[&str], default: Option<usize>) -> Self {
        FieldKind::Select(ChoiceItem::new(options, default))
    }

    /// Hidden literal field.
    pub fn hidden(value: impl Into<Value>) -> Self {
        FieldKind::Hidden {
            value: value.into(),
        }
    }

    /// Button field with a click handler.
    pub fn button<F>(on_click: F) -> Self
    where
        F: Fn(&mut Cursive) + Send + Sync + 'static,
    {
        FieldKind::Button {
            on_click: Arc::new(on_click),
        }
    }
}

/// Raw editor input collected from the UI before parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Content of a text editor.
    Text(String),
    /// State of a checkbox.
    Flag(bool),
    /// Selected option index of a choice editor.
    Index(Option<usize>),
}

/// A single labeled, typed, user-editable configuration entry.
#[derive(Debug, Clone)]
pub struct Field {
    /// Unique key within one panel.
    pub key: String,
    /// Label shown next to the editor.
    pub label: String,
    /// Label placement.
    pub label_pos: LabelPos,
    /// Optional section heading rendered before this field.
    pub section: Option<Section>,
    /// Value storage and type information.
    pub kind: FieldKind,
}

impl Field {
    /// Build a field from a key, a label, and a kind.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Field {
            key: key.into(),
            label: label.into(),
            label_pos: LabelPos::default(),
            section: None,
            kind,
        }
    }

    /// Set the label placement.
    pub fn label_pos(mut self, pos: LabelPos) -> Self {
        self.label_pos = pos;
        self
    }

    /// Start a new section before this field.
    pub fn section(mut self, heading: impl Into<String>) -> Self {
        self.section = Some(Section {
            heading: heading.into(),
            subheading: None,
        });
        self
    }

    /// Start a new section with a subheading before this field.
    pub fn section_detail(
        mut self,
        heading: impl Into<String>,
        subheading: impl Into<String>,
    ) -> Self {
        self.section = Some(Section {
            heading: heading.into(),
            subheading: Some(subheading.into()),
        });
        self
    }

    /// Whether this field contributes to the persisted value map.
    pub fn persistable(&self) -> bool {
        !matches!(self.kind, FieldKind::Button { .. })
    }

    /// Whether this field gets an editor row in the panel.
    pub fn rendered(&self) -> bool {
        !matches!(self.kind, FieldKind::Hidden { .. })
    }

    /// Check the definition for internal consistency.
    ///
    /// Bounds must be ordered, defaults must satisfy the bounds, and
    /// choice fields need a non-empty option list with an in-range
    /// default.
    pub fn validate(&self) -> Result<()> {
        match &self.kind {
            FieldKind::Int {
                default, min, max, ..
            } => {
                self.check_bound_order(min, max)?;
                if let Some(d) = default {
                    check_bounds(&self.key, *d, *min, *max)?;
                }
            }
            FieldKind::Unsigned {
                default, min, max, ..
            } => {
                self.check_bound_order(min, max)?;
                if let Some(d) = default {
                    check_bounds(&self.key, *d, *min, *max)?;
                }
            }
            FieldKind::Float {
                default, min, max, ..
            } => {
                self.check_bound_order(min, max)?;
                if let Some(d) = default {
                    check_bounds(&self.key, *d, *min, *max)?;
                }
            }
            FieldKind::Radio(choice) | FieldKind::Select(choice) => {
                if choice.options.is_empty() {
                    return Err(PanelError::InvalidField {
                        key: self.key.clone(),
                        reason: "choice field has no options".to_string(),
                    });
                }
                if let Some(d) = choice.default
                    && d >= choice.options.len()
                {
                    return Err(PanelError::InvalidField {
                        key: self.key.clone(),
                        reason: format!(
                            "default index {d} out of range for {} options",
                            choice.options.len()
                        ),
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn check_bound_order<T: PartialOrd + fmt::Display>(
        &self,
        min: &Option<T>,
        max: &Option<T>,
    ) -> Result<()> {
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(PanelError::InvalidField {
                key: self.key.clone(),
                reason: format!("min {lo} is greater than max {hi}"),
            });
        }
        Ok(())
    }

    /// Current effective value: the explicit value, else the default.
    ///
    /// Buttons never have a value; optional fields without value or
    /// default yield `None`.
    pub fn current(&self) -> Option<Value> {
        match &self.kind {
            FieldKind::Text { value, default } | FieldKind::Textarea { value, default } => value
                .as_ref()
                .or(default.as_ref())
                .map(|s| Value::Str(s.clone())),
            FieldKind::Int { value, default, .. } => value.or(*default).map(Value::Int),
            FieldKind::Unsigned { value, default, .. } => value.or(*default).map(Value::Uint),
            FieldKind::Float { value, default, .. } => value.or(*default).map(Value::Float),
            FieldKind::Checkbox { value, .. } => Some(Value::Bool(*value)),
            FieldKind::Radio(choice) | FieldKind::Select(choice) => {
                choice.current_str().map(|s| Value::Str(s.to_string()))
            }
            FieldKind::Hidden { value } => Some(value.clone()),
            FieldKind::Button { .. } => None,
        }
    }

    /// Type- and domain-checked update of the field's value.
    pub fn set_value(&mut self, new: Value) -> Result<()> {
        let key = self.key.clone();
        match &mut self.kind {
            FieldKind::Text { value, .. } | FieldKind::Textarea { value, .. } => match new {
                Value::Str(s) => {
                    *value = Some(s);
                    Ok(())
                }
                other => Err(type_mismatch(&key, "string", &other)),
            },
            FieldKind::Int {
                value, min, max, ..
            } => {
                let i = match new {
                    Value::Int(i) => i,
                    Value::Uint(u) => i64::try_from(u)
                        .map_err(|_| type_mismatch(&key, "integer", &Value::Uint(u)))?,
                    other => return Err(type_mismatch(&key, "integer", &other)),
                };
                check_bounds(&key, i, *min, *max)?;
                *value = Some(i);
                Ok(())
            }
            FieldKind::Unsigned {
                value, min, max, ..
            } => {
                let u = match new {
                    Value::Uint(u) => u,
                    Value::Int(i) => u64::try_from(i)
                        .map_err(|_| type_mismatch(&key, "unsigned integer", &Value::Int(i)))?,
                    other => return Err(type_mismatch(&key, "unsigned integer", &other)),
                };
                check_bounds(&key, u, *min, *max)?;
                *value = Some(u);
                Ok(())
            }
            FieldKind::Float {
                value, min, max, ..
            } => {
                let x = match new {
                    Value::Float(x) => x,
                    Value::Int(i) => i as f64,
                    Value::Uint(u) => u as f64,
                    other => return Err(type_mismatch(&key, "number", &other)),
                };
                check_bounds(&key, x, *min, *max)?;
                *value = Some(x);
                Ok(())
            }
            FieldKind::Checkbox { value, .. } => match new {
                Value::Bool(b) => {
                    *value = b;
                    Ok(())
                }
                other => Err(type_mismatch(&key, "boolean", &other)),
            },
            FieldKind::Radio(choice) | FieldKind::Select(choice) => choice.select(&new, &key),
            FieldKind::Hidden { value } => {
                *value = new;
                Ok(())
            }
            FieldKind::Button { .. } => Err(type_mismatch(&key, "no value (button field)", &new)),
        }
    }

    /// Restore the declared default. Returns whether the value changed.
    pub fn reset(&mut self) -> bool {
        match &mut self.kind {
            FieldKind::Text { value, .. }
            | FieldKind::Textarea { value, .. } => {
                let changed = value.is_some();
                *value = None;
                changed
            }
            FieldKind::Int { value, .. } => {
                let changed = value.is_some();
                *value = None;
                changed
            }
            FieldKind::Unsigned { value, .. } => {
                let changed = value.is_some();
                *value = None;
                changed
            }
            FieldKind::Float { value, .. } => {
                let changed = value.is_some();
                *value = None;
                changed
            }
            FieldKind::Checkbox { value, default } => {
                let changed = *value != *default;
                *value = *default;
                changed
            }
            FieldKind::Radio(choice) | FieldKind::Select(choice) => {
                let changed = choice.value.is_some();
                choice.value = None;
                changed
            }
            FieldKind::Hidden { .. } | FieldKind::Button { .. } => false,
        }
    }

    /// Serialize the current effective value for the store.
    ///
    /// `None` when the field is a button or has neither value nor
    /// default; such fields are skipped in the persisted map.
    pub fn as_json(&self) -> Option<Json> {
        self.current().map(|v| v.as_json())
    }

    /// Update the value from its persisted JSON representation.
    pub fn update_from_json(&mut self, json: &Json) -> Result<()> {
        let key = self.key.clone();
        let value = match (&self.kind, json) {
            (FieldKind::Text { .. } | FieldKind::Textarea { .. }, Json::String(s)) => {
                Value::Str(s.clone())
            }
            (FieldKind::Int { .. }, Json::Number(n)) => Value::Int(
                n.as_i64()
                    .ok_or_else(|| json_mismatch(&key, "integer", json))?,
            ),
            (FieldKind::Unsigned { .. }, Json::Number(n)) => Value::Uint(
                n.as_u64()
                    .ok_or_else(|| json_mismatch(&key, "unsigned integer", json))?,
            ),
            (FieldKind::Float { .. }, Json::Number(n)) => Value::Float(
                n.as_f64()
                    .ok_or_else(|| json_mismatch(&key, "number", json))?,
            ),
            (FieldKind::Checkbox { .. }, Json::Bool(b)) => Value::Bool(*b),
            (FieldKind::Radio(_) | FieldKind::Select(_), Json::String(s)) => {
                Value::Str(s.clone())
            }
            (FieldKind::Radio(_) | FieldKind::Select(_), Json::Number(n)) => Value::Uint(
                n.as_u64()
                    .ok_or_else(|| json_mismatch(&key, "option index", json))?,
            ),
            (FieldKind::Hidden { value }, json) => {
                // Stored literals keep whatever type they were declared with.
                let expected = value.kind();
                match (value, json) {
                    (Value::Str(_), Json::String(s)) => Value::Str(s.clone()),
                    (Value::Bool(_), Json::Bool(b)) => Value::Bool(*b),
                    (Value::Int(_), Json::Number(n)) => Value::Int(
                        n.as_i64()
                            .ok_or_else(|| json_mismatch(&key, expected, json))?,
                    ),
                    (Value::Uint(_), Json::Number(n)) => Value::Uint(
                        n.as_u64()
                            .ok_or_else(|| json_mismatch(&key, expected, json))?,
                    ),
                    (Value::Float(_), Json::Number(n)) => Value::Float(
                        n.as_f64()
                            .ok_or_else(|| json_mismatch(&key, expected, json))?,
                    ),
                    _ => return Err(json_mismatch(&key, expected, json)),
                }
            }
            (FieldKind::Button { .. }, json) => {
                return Err(json_mismatch(&key, "no value (button field)", json));
            }
            (_, json) => return Err(json_mismatch(&key, self.expected_name(), json)),
        };
        self.set_value(value)
    }

    /// Parse a raw editor input and update the value.
    ///
    /// Empty text clears optional numeric values instead of failing.
    /// Returns whether the stored value changed.
    pub fn apply_raw(&mut self, raw: RawInput) -> Result<bool> {
        let before = self.current();
        let key = self.key.clone();
        let expected = self.expected_name();
        match (&mut self.kind, raw) {
            (FieldKind::Text { value, .. }, RawInput::Text(s))
            | (FieldKind::Textarea { value, .. }, RawInput::Text(s)) => {
                *value = Some(s);
            }
            (FieldKind::Int { value, min, max, .. }, RawInput::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    *value = None;
                } else {
                    let i: i64 = s
                        .parse()
                        .map_err(|_| type_mismatch(&key, "integer", &Value::Str(s.into())))?;
                    check_bounds(&key, i, *min, *max)?;
                    *value = Some(i);
                }
            }
            (
                FieldKind::Unsigned {
                    value, min, max, ..
                },
                RawInput::Text(s),
            ) => {
                let s = s.trim();
                if s.is_empty() {
                    *value = None;
                } else {
                    let u: u64 = s.parse().map_err(|_| {
                        type_mismatch(&key, "unsigned integer", &Value::Str(s.into()))
                    })?;
                    check_bounds(&key, u, *min, *max)?;
                    *value = Some(u);
                }
            }
            (FieldKind::Float { value, min, max, .. }, RawInput::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    *value = None;
                } else {
                    let x: f64 = s
                        .parse()
                        .map_err(|_| type_mismatch(&key, "number", &Value::Str(s.into())))?;
                    check_bounds(&key, x, *min, *max)?;
                    *value = Some(x);
                }
            }
            (FieldKind::Checkbox { value, .. }, RawInput::Flag(b)) => {
                *value = b;
            }
            (FieldKind::Radio(choice), RawInput::Index(idx))
            | (FieldKind::Select(choice), RawInput::Index(idx)) => {
                if let Some(i) = idx {
                    choice.select_index(i, &key)?;
                }
            }
            (FieldKind::Hidden { .. }, _) | (FieldKind::Button { .. }, _) => {}
            (_, raw) => {
                return Err(PanelError::TypeMismatch {
                    key,
                    expected: expected.to_string(),
                    actual: format!("{raw:?}"),
                });
            }
        }
        Ok(self.current() != before)
    }

    fn expected_name(&self) -> &'static str {
        match &self.kind {
            FieldKind::Text { .. } => "string",
            FieldKind::Textarea { .. } => "string",
            FieldKind::Int { .. } => "integer",
            FieldKind::Unsigned { .. } => "unsigned integer",
            FieldKind::Float { .. } => "number",
            FieldKind::Checkbox { .. } => "boolean",
            FieldKind::Radio(_) | FieldKind::Select(_) => "option name or index",
            FieldKind::Hidden { .. } => "stored literal",
            FieldKind::Button { .. } => "no value (button field)",
        }
    }
}

fn type_mismatch(key: &str, expected: &str, actual: &Value) -> PanelError {
    PanelError::TypeMismatch {
        key: key.to_string(),
        expected: expected.to_string(),
        actual: format!("{} `{}`", actual.kind(), actual),
    }
}

fn json_mismatch(key: &str, expected: &str, actual: &Json) -> PanelError {
    PanelError::TypeMismatch {
        key: key.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

fn check_bounds<T>(key: &str, v: T, min: Option<T>, max: Option<T>) -> Result<()>
where
    T: PartialOrd + fmt::Display + Copy,
{
    let below = min.map(|lo| v < lo).unwrap_or(false);
    let above = max.map(|hi| v > hi).unwrap_or(false);
    if below || above {
        return Err(PanelError::OutOfRange {
            key: key.to_string(),
            value: v.to_string(),
            min: min.map_or_else(|| "-inf".to_string(), |lo| lo.to_string()),
            max: max.map_or_else(|| "+inf".to_string(), |hi| hi.to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_select_by_name_and_index() {
        let mut choice = ChoiceItem::new(&["low", "high"], Some(0));
        choice.select(&Value::Str("high".into()), "level").unwrap();
        assert_eq!(choice.value_str(), Some("high"));

        choice.select(&Value::Uint(0), "level").unwrap();
        assert_eq!(choice.value_str(), Some("low"));

        let err = choice.select(&Value::Str("mid".into()), "level");
        assert!(matches!(err, Err(PanelError::UnknownOption { .. })));

        let err = choice.select(&Value::Uint(5), "level");
        assert!(matches!(err, Err(PanelError::UnknownOption { .. })));
    }

    #[test]
    fn bounds_are_enforced_on_set() {
        let mut field = Field::new("jobs", "Jobs", FieldKind::unsigned(Some(4), Some(1), Some(16)));
        field.set_value(Value::Uint(8)).unwrap();
        assert_eq!(field.current(), Some(Value::Uint(8)));

        let err = field.set_value(Value::Uint(64));
        assert!(matches!(err, Err(PanelError::OutOfRange { .. })));
        // Rejected values leave the previous one in place.
        assert_eq!(field.current(), Some(Value::Uint(8)));
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let field = Field::new("n", "N", FieldKind::int(None, Some(10), Some(1)));
        assert!(matches!(
            field.validate(),
            Err(PanelError::InvalidField { .. })
        ));

        let field = Field::new("n", "N", FieldKind::int(Some(0), Some(1), Some(9)));
        assert!(matches!(
            field.validate(),
            Err(PanelError::OutOfRange { .. })
        ));

        let field = Field::new("c", "C", FieldKind::select(&[], None));
        assert!(matches!(
            field.validate(),
            Err(PanelError::InvalidField { .. })
        ));

        let field = Field::new("c", "C", FieldKind::radio(&["a"], Some(3)));
        assert!(matches!(
            field.validate(),
            Err(PanelError::InvalidField { .. })
        ));
    }

    #[test]
    fn current_prefers_value_over_default() {
        let mut field = Field::new("host", "Host", FieldKind::text(Some("localhost")));
        assert_eq!(field.current(), Some(Value::Str("localhost".into())));
        field.set_value(Value::Str("example.com".into())).unwrap();
        assert_eq!(field.current(), Some(Value::Str("example.com".into())));
        assert!(field.reset());
        assert_eq!(field.current(), Some(Value::Str("localhost".into())));
    }

    #[test]
    fn update_from_json_checks_types() {
        let mut field = Field::new("port", "Port", FieldKind::unsigned(Some(80), None, None));
        field.update_from_json(&serde_json::json!(8080)).unwrap();
        assert_eq!(field.current(), Some(Value::Uint(8080)));

        let err = field.update_from_json(&serde_json::json!("not a port"));
        assert!(matches!(err, Err(PanelError::TypeMismatch { .. })));
    }

    #[test]
    fn raw_input_parsing() {
        let mut field = Field::new("retries", "Retries", FieldKind::int(Some(3), Some(0), Some(9)));
        assert!(field.apply_raw(RawInput::Text("5".into())).unwrap());
        assert_eq!(field.current(), Some(Value::Int(5)));

        // Empty text clears the explicit value, falling back to the default.
        assert!(field.apply_raw(RawInput::Text("  ".into())).unwrap());
        assert_eq!(field.current(), Some(Value::Int(3)));

        let err = field.apply_raw(RawInput::Text("many".into()));
        assert!(matches!(err, Err(PanelError::TypeMismatch { .. })));

        let err = field.apply_raw(RawInput::Text("99".into()));
        assert!(matches!(err, Err(PanelError::OutOfRange { .. })));
    }

    #[test]
    fn buttons_have_no_value() {
        let field = Field::new("apply", "Apply", FieldKind::button(|_s| {}));
        assert!(field.current().is_none());
        assert!(!field.persistable());
        assert!(field.as_json().is_none());
    }
}

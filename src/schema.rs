//! Deriving a field set from a JSON Schema document.
//!
//! This is how typed configs become panels: generate a schema with
//! `schemars`, convert it here, and every supported property turns
//! into a field. Only flat schemas of scalar properties are supported;
//! nested objects and arrays are rejected so a misdeclared config
//! fails loudly instead of losing settings.

use log::warn;
use serde_json::Value as Json;

use crate::{
    data::{
        field::{Field, FieldKind},
        fields::FieldSet,
    },
    error::{PanelError, Result},
};

/// Build a [`FieldSet`] from a JSON Schema document.
///
/// Mapping: `boolean` → checkbox, `string` → text, string enums
/// (inline `enum` or `oneOf`/`const`, including through `$ref`) →
/// select, `integer` → int or unsigned (by `format`/`minimum`),
/// `number` → float. `default`, `title`, and numeric bounds are
/// honored.
pub fn fields_from_schema(schema: &Json) -> Result<FieldSet> {
    let root = resolve_ref(schema, schema)?;
    let Some(properties) = root.get("properties").and_then(Json::as_object) else {
        return Err(PanelError::Schema {
            path: "#".to_string(),
            reason: "missing `properties` object".to_string(),
        });
    };

    let mut fields = FieldSet::new();
    for (key, property) in properties {
        fields.insert(field_from_property(schema, key, property)?)?;
    }
    Ok(fields)
}

/// Follow a document-local `$ref` one level; plain nodes pass through.
fn resolve_ref<'a>(root: &'a Json, node: &'a Json) -> Result<&'a Json> {
    let Some(reference) = node.get("$ref").and_then(Json::as_str) else {
        return Ok(node);
    };
    let Some(pointer) = reference.strip_prefix("#/") else {
        return Err(PanelError::Schema {
            path: reference.to_string(),
            reason: "only document-local references are supported".to_string(),
        });
    };
    let mut target = root;
    for segment in pointer.split('/') {
        target = target.get(segment).ok_or_else(|| PanelError::Schema {
            path: reference.to_string(),
            reason: "reference target not found".to_string(),
        })?;
    }
    Ok(target)
}

fn field_from_property(root: &Json, key: &str, property: &Json) -> Result<Field> {
    let node = resolve_ref(root, property)?;

    // Keys and defaults on the referring site win over the target's.
    let label = text_of(property, "title")
        .or_else(|| text_of(node, "title"))
        .unwrap_or(key)
        .to_string();
    let default = property.get("default").or_else(|| node.get("default"));

    if let Some(options) = enum_options(node) {
        let refs: Vec<&str> = options.iter().map(String::as_str).collect();
        let default_idx = match default.and_then(Json::as_str) {
            Some(d) => Some(options.iter().position(|o| o == d).ok_or_else(|| {
                PanelError::Schema {
                    path: key.to_string(),
                    reason: format!("default `{d}` is not one of the enum values"),
                }
            })?),
            None => None,
        };
        return Ok(Field::new(key, label, FieldKind::select(&refs, default_idx)));
    }

    if node.get("exclusiveMinimum").is_some() || node.get("exclusiveMaximum").is_some() {
        warn!("`{key}`: exclusive bounds are not supported and were ignored");
    }

    let kind = match type_name(node, key)? {
        "boolean" => FieldKind::checkbox(
            default
                .map(|d| {
                    d.as_bool().ok_or_else(|| bad_default(key, "boolean", d))
                })
                .transpose()?
                .unwrap_or(false),
        ),
        "string" => FieldKind::text(
            default
                .map(|d| d.as_str().ok_or_else(|| bad_default(key, "string", d)))
                .transpose()?,
        ),
        "integer" => {
            let unsigned = text_of(node, "format").is_some_and(|f| f.starts_with("uint"))
                || bound_i64(node, "minimum").is_some_and(|m| m >= 0);
            if unsigned {
                FieldKind::unsigned(
                    default
                        .map(|d| d.as_u64().ok_or_else(|| bad_default(key, "unsigned integer", d)))
                        .transpose()?,
                    bound_u64(node, "minimum"),
                    bound_u64(node, "maximum"),
                )
            } else {
                FieldKind::int(
                    default
                        .map(|d| d.as_i64().ok_or_else(|| bad_default(key, "integer", d)))
                        .transpose()?,
                    bound_i64(node, "minimum"),
                    bound_i64(node, "maximum"),
                )
            }
        }
        "number" => FieldKind::float(
            default
                .map(|d| d.as_f64().ok_or_else(|| bad_default(key, "number", d)))
                .transpose()?,
            node.get("minimum").and_then(Json::as_f64),
            node.get("maximum").and_then(Json::as_f64),
        ),
        other => {
            return Err(PanelError::Schema {
                path: key.to_string(),
                reason: format!("unsupported type `{other}`"),
            });
        }
    };

    Ok(Field::new(key, label, kind))
}

/// The node's type name; for type arrays, the first non-null entry.
fn type_name<'a>(node: &'a Json, key: &str) -> Result<&'a str> {
    match node.get("type") {
        Some(Json::String(t)) => Ok(t.as_str()),
        Some(Json::Array(types)) => types
            .iter()
            .filter_map(Json::as_str)
            .find(|t| *t != "null")
            .ok_or_else(|| PanelError::Schema {
                path: key.to_string(),
                reason: "no usable entry in type array".to_string(),
            }),
        _ => Err(PanelError::Schema {
            path: key.to_string(),
            reason: "property has no type".to_string(),
        }),
    }
}

/// String-enum options from an inline `enum` list or `oneOf`/`const`
/// variants. `None` when the node is not a string enum.
fn enum_options(node: &Json) -> Option<Vec<String>> {
    if let Some(values) = node.get("enum").and_then(Json::as_array) {
        let options: Vec<String> = values
            .iter()
            .filter_map(Json::as_str)
            .map(str::to_string)
            .collect();
        if options.len() == values.len() && !options.is_empty() {
            return Some(options);
        }
        return None;
    }
    if let Some(variants) = node.get("oneOf").and_then(Json::as_array) {
        let options: Vec<String> = variants
            .iter()
            .filter_map(|v| v.get("const").and_then(Json::as_str))
            .map(str::to_string)
            .collect();
        if options.len() == variants.len() && !options.is_empty() {
            return Some(options);
        }
    }
    None
}

fn text_of<'a>(node: &'a Json, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Json::as_str)
}

// Schema generators disagree on whether integer bounds are written as
// integers or floats; accept both when the float is integral.

fn bound_i64(node: &Json, key: &str) -> Option<i64> {
    let n = node.get(key)?;
    n.as_i64()
        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

fn bound_u64(node: &Json, key: &str) -> Option<u64> {
    let n = node.get(key)?;
    n.as_u64()
        .or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })
}

fn bad_default(key: &str, expected: &str, default: &Json) -> PanelError {
    PanelError::Schema {
        path: key.to_string(),
        reason: format!("default {default} is not a {expected}"),
    }
}

#[cfg(test)]
mod tests {
    use schemars::{JsonSchema, schema_for};

    use super::*;
    use crate::data::value::Value;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    enum Mode {
        Fast,
        Careful,
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Sample {
        host: String,
        port: u16,
        retries: i64,
        ratio: f64,
        verbose: bool,
        mode: Mode,
    }

    fn sample_fields() -> FieldSet {
        let schema = serde_json::to_value(schema_for!(Sample)).unwrap();
        fields_from_schema(&schema).unwrap()
    }

    #[test]
    fn scalar_types_map_to_field_kinds() {
        let fields = sample_fields();
        assert!(matches!(
            fields.get("host").unwrap().kind,
            FieldKind::Text { .. }
        ));
        assert!(matches!(
            fields.get("port").unwrap().kind,
            FieldKind::Unsigned { .. }
        ));
        assert!(matches!(
            fields.get("retries").unwrap().kind,
            FieldKind::Int { .. }
        ));
        assert!(matches!(
            fields.get("ratio").unwrap().kind,
            FieldKind::Float { .. }
        ));
        assert!(matches!(
            fields.get("verbose").unwrap().kind,
            FieldKind::Checkbox { .. }
        ));
    }

    #[test]
    fn enums_become_select_fields() {
        let fields = sample_fields();
        match &fields.get("mode").unwrap().kind {
            FieldKind::Select(choice) => {
                assert_eq!(choice.options, ["Fast", "Careful"]);
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn unsigned_bounds_are_carried_over() {
        let fields = sample_fields();
        match &fields.get("port").unwrap().kind {
            FieldKind::Unsigned { max, .. } => {
                assert_eq!(*max, Some(65535));
            }
            other => panic!("expected unsigned, got {other:?}"),
        }
    }

    #[test]
    fn defaults_and_bounds_from_raw_schema() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "level": {
                    "type": "string",
                    "enum": ["debug", "info", "warn"],
                    "default": "info"
                },
                "jobs": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 32,
                    "default": 4
                }
            }
        });
        let fields = fields_from_schema(&schema).unwrap();

        assert_eq!(
            fields.get("level").unwrap().current(),
            Some(Value::Str("info".into()))
        );
        match &fields.get("jobs").unwrap().kind {
            FieldKind::Unsigned { default, min, max, .. } => {
                assert_eq!((*default, *min, *max), (Some(4), Some(1), Some(32)));
            }
            other => panic!("expected unsigned, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_constructs_are_errors() {
        let schema = serde_json::json!({
            "type": "object",
            "properties": { "nested": { "type": "object" } }
        });
        assert!(matches!(
            fields_from_schema(&schema),
            Err(PanelError::Schema { .. })
        ));

        let schema = serde_json::json!({ "type": "object" });
        assert!(matches!(
            fields_from_schema(&schema),
            Err(PanelError::Schema { .. })
        ));

        let schema = serde_json::json!({
            "type": "object",
            "properties": {
                "level": { "type": "string", "enum": ["a"], "default": "b" }
            }
        });
        assert!(matches!(
            fields_from_schema(&schema),
            Err(PanelError::Schema { .. })
        ));
    }
}

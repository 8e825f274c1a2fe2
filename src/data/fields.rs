//! Ordered, unique-keyed collection of fields.

use log::warn;
use serde_json::Value as Json;

use crate::{
    data::field::Field,
    error::{PanelError, Result},
};

/// Map from field key to field, keeping insertion order for rendering.
///
/// Keys are unique per panel; inserting a duplicate is an error.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    entries: Vec<Field>,
}

impl FieldSet {
    /// Empty field set.
    pub fn new() -> Self {
        FieldSet::default()
    }

    /// Append a field, rejecting duplicate keys.
    pub fn insert(&mut self, field: Field) -> Result<()> {
        if self.entries.iter().any(|f| f.key == field.key) {
            return Err(PanelError::DuplicateKey(field.key));
        }
        self.entries.push(field);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: Field) -> Result<Self> {
        self.insert(field)?;
        Ok(self)
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.entries.iter().find(|f| f.key == key)
    }

    /// Look up a field by key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.entries.iter_mut().find(|f| f.key == key)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.entries.iter()
    }

    /// Iterate fields in insertion order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.entries.iter_mut()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate every field definition.
    pub fn validate(&self) -> Result<()> {
        for field in &self.entries {
            field.validate()?;
        }
        Ok(())
    }

    /// Serialize all persistable fields into a flat JSON map.
    ///
    /// Buttons and fields without value or default are skipped.
    pub fn as_json(&self) -> serde_json::Map<String, Json> {
        let mut map = serde_json::Map::new();
        for field in &self.entries {
            if !field.persistable() {
                continue;
            }
            if let Some(value) = field.as_json() {
                map.insert(field.key.clone(), value);
            }
        }
        map
    }

    /// Update field values from a persisted JSON map.
    ///
    /// Keys with no matching field are logged and skipped; type
    /// mismatches on matching keys are errors.
    pub fn update_from_json(&mut self, map: &serde_json::Map<String, Json>) -> Result<()> {
        for (key, value) in map {
            match self.get_mut(key) {
                Some(field) => field.update_from_json(value)?,
                None => warn!("ignoring stored value for unknown key `{key}`"),
            }
        }
        Ok(())
    }

    /// Restore every field to its declared default.
    pub fn reset(&mut self) {
        for field in &mut self.entries {
            field.reset();
        }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::field::FieldKind;

    fn sample() -> FieldSet {
        FieldSet::new()
            .with(Field::new("host", "Host", FieldKind::text(Some("localhost"))))
            .unwrap()
            .with(Field::new("port", "Port", FieldKind::unsigned(Some(80), Some(1), Some(65535))))
            .unwrap()
            .with(Field::new("tls", "Use TLS", FieldKind::checkbox(false)))
            .unwrap()
            .with(Field::new("about", "About", FieldKind::button(|_s| {})))
            .unwrap()
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut fields = sample();
        let err = fields.insert(Field::new("host", "Host again", FieldKind::text(None)));
        assert!(matches!(err, Err(PanelError::DuplicateKey(k)) if k == "host"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let fields = sample();
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["host", "port", "tls", "about"]);
    }

    #[test]
    fn json_map_skips_buttons() {
        let fields = sample();
        let map = fields.as_json();
        assert_eq!(map.len(), 3);
        assert!(!map.contains_key("about"));
        assert_eq!(map["host"], serde_json::json!("localhost"));
        assert_eq!(map["port"], serde_json::json!(80));
        assert_eq!(map["tls"], serde_json::json!(false));
    }

    #[test]
    fn unknown_stored_keys_are_skipped() {
        let mut fields = sample();
        let map = serde_json::json!({ "port": 8080, "stale": "old" });
        fields.update_from_json(map.as_object().unwrap()).unwrap();
        assert_eq!(
            fields.get("port").unwrap().current(),
            Some(crate::data::value::Value::Uint(8080))
        );
    }

    #[test]
    fn stored_type_mismatch_is_an_error() {
        let mut fields = sample();
        let map = serde_json::json!({ "tls": "yes" });
        let err = fields.update_from_json(map.as_object().unwrap());
        assert!(matches!(err, Err(PanelError::TypeMismatch { .. })));
    }
}

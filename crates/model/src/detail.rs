use crate::{is_unknown_json, FieldRule};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extended record for a single selected item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DetailRecord {
    fields: Map<String, Value>,
}

/// A field that survived unknown-value filtering, ready for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedField {
    pub key: String,
    pub label: String,
    /// Raw value as returned by the endpoint
    pub value: String,
    /// Value with the rule's unit suffix applied
    pub display: String,
}

impl DetailRecord {
    #[must_use]
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Accepts JSON objects only; anything else is not a record.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Scalar field as text, or `None` when it is absent or one of the unknown sentinels.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<String> {
        let value = self.fields.get(key);
        if is_unknown_json(value) {
            return None;
        }
        match value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Apply `rules` in order, dropping every field whose value is unknown.
    #[must_use]
    pub fn render(&self, rules: &[FieldRule]) -> Vec<RenderedField> {
        rules
            .iter()
            .filter_map(|rule| {
                let value = self.scalar(&rule.key)?;
                let display = match &rule.suffix {
                    Some(suffix) => format!("{value}{suffix}"),
                    None => value.clone(),
                };
                Some(RenderedField {
                    key: rule.key.clone(),
                    label: rule.label.clone(),
                    value,
                    display,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> DetailRecord {
        DetailRecord::from_json(value).expect("object")
    }

    #[test]
    fn render_skips_unknown_fields() {
        let rules = vec![
            FieldRule::new("height", "Height").with_suffix("cm"),
            FieldRule::new("mass", "Mass").with_suffix("kg"),
            FieldRule::new("gender", "Gender"),
        ];
        let detail = record(json!({"height": "172", "mass": "unknown", "gender": "n/a"}));

        let rendered = detail.render(&rules);
        let labels: Vec<&str> = rendered.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Height", "Gender"]);
        assert_eq!(rendered[0].display, "172cm");
        assert_eq!(rendered[0].value, "172");
    }

    #[test]
    fn numbers_render_as_text() {
        let detail = record(json!({"length": 4.5, "crew": 0}));
        assert_eq!(detail.scalar("length").as_deref(), Some("4.5"));
        assert_eq!(detail.scalar("crew").as_deref(), Some("0"));
        assert_eq!(detail.scalar("missing"), None);
    }

    #[test]
    fn non_object_is_not_a_record() {
        assert!(DetailRecord::from_json(json!([1, 2])).is_none());
        assert!(DetailRecord::from_json(json!("text")).is_none());
    }
}

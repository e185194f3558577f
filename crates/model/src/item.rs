use crate::{DetailRecord, ModelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a collection listing.
///
/// `url` is both the identity of the item and the address of its detail record. Every other
/// field the endpoint returned is kept in `fields` untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionItem {
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CollectionItem {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            fields: Map::new(),
        }
    }

    /// Builder: attach an inline field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Parse an item out of an arbitrary JSON value.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = &value else {
            return Err(ModelError::MissingField("name"));
        };
        if !map.get("name").is_some_and(Value::is_string) {
            return Err(ModelError::MissingField("name"));
        }
        if !map.get("url").is_some_and(Value::is_string) {
            return Err(ModelError::MissingField("url"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The item's own fields viewed as a detail record (name and url included).
    #[must_use]
    pub fn to_detail(&self) -> DetailRecord {
        let mut fields = self.fields.clone();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields.insert("url".to_string(), Value::String(self.url.clone()));
        DetailRecord::from_map(fields)
    }
}

/// Body of a collection endpoint response. Only `results` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollectionPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<CollectionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn page_keeps_inline_fields() {
        let page: CollectionPage = serde_json::from_value(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [
                {
                    "name": "Luke Skywalker",
                    "url": "https://x/people/1/",
                    "height": "172",
                    "films": []
                }
            ]
        }))
        .expect("page");

        assert_eq!(page.count, Some(1));
        let luke = &page.results[0];
        assert_eq!(luke.name, "Luke Skywalker");
        assert_eq!(luke.fields.get("height"), Some(&json!("172")));
        assert!(!luke.fields.contains_key("name"));
    }

    #[test]
    fn page_without_results_is_rejected() {
        let err = serde_json::from_value::<CollectionPage>(json!({"detail": "Not found"}));
        assert!(err.is_err());
    }

    #[test]
    fn from_json_reports_missing_url() {
        let err = CollectionItem::from_json(json!({"name": "Speeder"})).unwrap_err();
        assert!(matches!(err, ModelError::MissingField("url")));
    }

    #[test]
    fn to_detail_includes_identity() {
        let item =
            CollectionItem::new("Leia Organa", "https://x/people/5/").with_field("mass", "49");
        let detail = item.to_detail();
        assert_eq!(detail.name(), Some("Leia Organa"));
        assert_eq!(detail.scalar("mass").as_deref(), Some("49"));
        assert_eq!(detail.scalar("url").as_deref(), Some("https://x/people/5/"));
    }
}

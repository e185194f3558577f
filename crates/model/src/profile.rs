use crate::{image_address, CollectionItem, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The collections the browser knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    People,
    Vehicles,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::People, ResourceKind::Vehicles];

    /// Path segment of the collection endpoint
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "people" | "person" => Ok(Self::People),
            "vehicles" | "vehicle" => Ok(Self::Vehicles),
            other => Err(ModelError::UnknownResource(other.to_string())),
        }
    }
}

/// What activating an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// The listing already carries the fields; open the overlay from the item itself
    Inline,
    /// Fetch `item.url` and open the overlay with the response
    FetchDetail,
}

/// How one detail field is labelled and suffixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl FieldRule {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            suffix: None,
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Per-collection configuration of the generic collection view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProfile {
    pub kind: ResourceKind,
    pub title: String,
    pub activation: Activation,
    pub fields: Vec<FieldRule>,
    /// Base address for item images; `None` disables images for the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base: Option<String>,
}

impl ResourceProfile {
    #[must_use]
    pub fn people() -> Self {
        Self {
            kind: ResourceKind::People,
            title: "People".to_string(),
            activation: Activation::Inline,
            fields: vec![
                FieldRule::new("height", "Height").with_suffix("cm"),
                FieldRule::new("mass", "Mass").with_suffix("kg"),
                FieldRule::new("gender", "Gender"),
                FieldRule::new("birth_year", "Birth Year"),
            ],
            image_base: None,
        }
    }

    #[must_use]
    pub fn vehicles() -> Self {
        Self {
            kind: ResourceKind::Vehicles,
            title: "Vehicles".to_string(),
            activation: Activation::FetchDetail,
            fields: vec![
                FieldRule::new("model", "Model"),
                FieldRule::new("manufacturer", "Manufacturer"),
                FieldRule::new("cost_in_credits", "Cost in Credits"),
                FieldRule::new("length", "Length"),
                FieldRule::new("max_atmosphering_speed", "Max Atmosphering Speed"),
                FieldRule::new("passengers", "Passengers"),
                FieldRule::new("cargo_capacity", "Cargo Capacity"),
                FieldRule::new("consumables", "Consumables"),
                FieldRule::new("vehicle_class", "Vehicle Class"),
            ],
            image_base: None,
        }
    }

    /// Default profile for `kind`
    #[must_use]
    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::People => Self::people(),
            ResourceKind::Vehicles => Self::vehicles(),
        }
    }

    #[must_use]
    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = Some(base.into());
        self
    }

    #[must_use]
    pub const fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    #[must_use]
    pub fn image_for(&self, item: &CollectionItem) -> Option<String> {
        let base = self.image_base.as_deref()?;
        image_address(base, &item.url)
    }
}

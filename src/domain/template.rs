use crate::framework::{date, PropertyMap, ResourceRecord};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A reusable message template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date::option_wire"
    )]
    pub last_modified: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl ResourceRecord for TemplateRecord {
    const RESOURCE_PATH: &'static str = "/templates";
}

impl TemplateRecord {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

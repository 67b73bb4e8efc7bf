use crate::framework::{date, PropertyMap, ResourceRecord};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A contact in the address book.
///
/// # Resource Framework
/// This struct implements [`ResourceRecord`], so it can back an
/// [`InstanceResource`](crate::framework::InstanceResource) at `/contacts`.
/// Fields the server sends that are not modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date::option_wire"
    )]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "date::option_wire"
    )]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl ResourceRecord for ContactRecord {
    const RESOURCE_PATH: &'static str = "/contacts";
}

impl ContactRecord {
    /// Creates a draft contact with a phone number.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Self::default()
        }
    }
}

//! # ResourceRecord Trait
//!
//! The contract every concrete resource (Contact, Template, …) implements to be
//! driven by the generic [`InstanceResource`](crate::framework::InstanceResource).
//!
//! A resource contributes two things:
//! - its endpoint stem ([`ResourceRecord::RESOURCE_PATH`]), e.g. `/contacts`;
//! - a strongly typed record, converted to and from the property bag with serde.
//!
//! The lifecycle itself (load, create-or-update, delete, refetch) is written once
//! in the engine and shared by every resource.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait that any resource record must implement to be managed by `InstanceResource`.
///
/// Records should model known fields as `Option`s and keep unknown ones in a
/// `#[serde(flatten)]` map so that round-tripping through the bag loses nothing.
pub trait ResourceRecord: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    /// Endpoint stem, starting with `/` and without a trailing slash.
    const RESOURCE_PATH: &'static str;

    /// Path of one item of this resource.
    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::RESOURCE_PATH, id)
    }
}

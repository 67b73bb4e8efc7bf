//! # Instance Lifecycle Engine
//!
//! [`InstanceResource`] is a handle for one remote object. It owns the property
//! bag and the scratch request parameters, and drives the CRUD lifecycle over a
//! shared [`RestClient`].
//!
//! ## States
//!
//! | State     | Bag                         | Legal operations               |
//! |-----------|-----------------------------|--------------------------------|
//! | `Empty`   | no properties               | `get`, setters, `create_or_update` |
//! | `Draft`   | properties, no `id`         | setters, `create_or_update`    |
//! | `Loaded`  | `id` + server fields        | setters, `create_or_update`, `delete` |
//! | `Mutated` | `id` + local modifications  | setters, `create_or_update`, `delete` |
//!
//! `get` is only legal from `Empty`; `delete` needs an `id`. Violations fail with
//! [`ResourceError::Unsupported`] before any request is sent.
//!
//! ## Refetch
//!
//! After a successful write the local bag is thrown away and replaced by a fresh
//! `GET` of the item, so the handle always reflects the server's defaults,
//! normalizations and computed fields.
//!
//! ## Failures
//!
//! If the transport itself fails (`ResourceError::Transport`), the bag may be
//! half-updated. Discard the instance or call
//! [`clear_properties`](InstanceResource::clear_properties) before retrying.

use crate::framework::error::ResourceError;
use crate::framework::params::build_request_parameters;
use crate::framework::resource::ResourceRecord;
use crate::framework::transport::{Method, Parameters, RestClient};
use crate::framework::value::{PropertyBag, PropertyMap};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::Value;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const EXISTENT: &str = "This operation is unsupported for existent objects";
const NON_EXISTENT: &str = "This operation is unsupported for non existent objects";

/// Conceptual state of an instance, derived from its bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Empty,
    Draft,
    Loaded,
    Mutated,
}

/// Result of [`InstanceResource::create_or_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Write accepted and the refetch succeeded; the bag holds the server copy.
    Saved,
    /// The write response carried the error flag. Nothing was refetched and the
    /// local bag is untouched.
    WriteFailed { status: u16 },
    /// Write accepted but the refetch reported an error. The bag holds whatever
    /// the refetch response decoded to.
    RefetchFailed { status: u16 },
}

impl WriteOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, WriteOutcome::Saved)
    }
}

/// A handle for one remote object of resource `R`.
///
/// Not synchronized: every mutating operation takes `&mut self`. The client is
/// shared and may serve many instances at once.
pub struct InstanceResource<R: ResourceRecord, C: RestClient> {
    client: Arc<C>,
    properties: PropertyBag,
    parameters: Parameters,
    dirty: bool,
    _record: PhantomData<fn() -> R>,
}

impl<R: ResourceRecord, C: RestClient> InstanceResource<R, C> {
    /// Creates an empty instance.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            properties: PropertyBag::new(),
            parameters: Parameters::new(),
            dirty: false,
            _record: PhantomData,
        }
    }

    /// Creates an instance seeded with a copy of `properties`.
    pub fn with_properties(client: Arc<C>, properties: &PropertyMap) -> Self {
        let mut instance = Self::new(client);
        instance.properties = PropertyBag::from_map(properties.clone());
        instance
    }

    /// Creates an instance seeded from a typed record.
    pub fn from_record(client: Arc<C>, record: &R) -> Result<Self, ResourceError> {
        match serde_json::to_value(record)? {
            Value::Object(map) => {
                let mut instance = Self::new(client);
                instance.properties = PropertyBag::from_map(map);
                Ok(instance)
            }
            other => {
                let message = format!(
                    "{} record serialized to {other}, expected an object",
                    R::RESOURCE_PATH
                );
                Err(ResourceError::Decode(
                    <serde_json::Error as serde::ser::Error>::custom(message),
                ))
            }
        }
    }

    /// Decodes the bag into the typed record.
    pub fn record(&self) -> Result<R, ResourceError> {
        Ok(serde_json::from_value(Value::Object(
            self.properties.as_map().clone(),
        ))?)
    }

    pub fn resource_path(&self) -> &'static str {
        R::RESOURCE_PATH
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn state(&self) -> InstanceState {
        match self.properties.id() {
            _ if self.properties.is_empty() => InstanceState::Empty,
            Ok(Some(_)) if self.dirty => InstanceState::Mutated,
            Ok(Some(_)) => InstanceState::Loaded,
            _ => InstanceState::Draft,
        }
    }

    // --- Property bag ---

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn id(&self) -> Result<Option<i64>, ResourceError> {
        self.properties.id()
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.set(name, value);
        self.dirty = true;
    }

    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        let removed = self.properties.remove(name);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn date(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.properties.get_date(name)
    }

    pub fn set_date<Tz>(&mut self, name: impl Into<String>, value: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.properties.set_date(name, value);
        self.dirty = true;
    }

    pub fn clear_properties(&mut self) {
        self.properties.clear();
        self.dirty = false;
    }

    // --- Scratch parameters ---

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Adds a per-request override sent with every subsequent request.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    pub fn clear_parameters(&mut self) {
        self.parameters = Parameters::new();
    }

    /// Scratch parameters overlaid with `body`; body keys win.
    fn request_parameters(&self, body: Parameters) -> Option<Parameters> {
        let mut merged = self.parameters.clone();
        merged.extend(body);
        (!merged.is_empty()).then_some(merged)
    }

    // --- Lifecycle ---

    /// Loads item `id` into an empty instance.
    ///
    /// Returns `Ok(true)` when the response is not flagged as an error. The bag
    /// is replaced by the decoded response in both cases, so an error envelope
    /// can be inspected through the property accessors.
    #[instrument(skip(self), fields(resource = R::RESOURCE_PATH))]
    pub async fn get(&mut self, id: i64) -> Result<bool, ResourceError> {
        if !self.properties.is_empty() {
            warn!("get on a non-empty instance");
            return Err(ResourceError::Unsupported(EXISTENT));
        }

        self.load(id).await.map(|(_, ok)| ok)
    }

    async fn load(&mut self, id: i64) -> Result<(u16, bool), ResourceError> {
        let path = R::item_path(id);
        let parameters = self.request_parameters(Parameters::new());
        let response = self
            .client
            .request(&path, Method::Get, parameters.as_ref())
            .await?;

        let (status, failed) = (response.status(), response.is_error());
        self.properties = PropertyBag::from_map(response.into_map());
        self.dirty = false;

        if failed {
            warn!(%path, status, "Get failed");
        } else {
            debug!(%path, size = self.properties.len(), "Loaded");
        }
        Ok((status, !failed))
    }

    /// Creates (POST, no `id`) or updates (PUT, with `id`) the remote object,
    /// then refetches it.
    ///
    /// A POST response without an id is a protocol error. A PUT response without
    /// one falls back to the local id.
    #[instrument(skip(self), fields(resource = R::RESOURCE_PATH))]
    pub async fn create_or_update(&mut self) -> Result<WriteOutcome, ResourceError> {
        let local_id = self.properties.id()?;
        let (method, path) = match local_id {
            None => (Method::Post, R::RESOURCE_PATH.to_string()),
            Some(id) => (Method::Put, R::item_path(id)),
        };

        let body = build_request_parameters(self.properties.as_map());
        debug!(%method, %path, ?body, "Write");
        let parameters = self.request_parameters(body);
        let response = self
            .client
            .request(&path, method, parameters.as_ref())
            .await?;

        if response.is_error() {
            warn!(%method, %path, status = response.status(), "Write failed");
            return Ok(WriteOutcome::WriteFailed {
                status: response.status(),
            });
        }

        let id = response
            .id()?
            .or(local_id)
            .ok_or(ResourceError::MissingId { method })?;

        self.clear_properties();
        let (status, ok) = self.load(id).await?;
        if !ok {
            warn!(id, status, "Refetch failed");
            return Ok(WriteOutcome::RefetchFailed { status });
        }

        match self.properties.id()? {
            Some(_) => {
                info!(%method, id, "Saved");
                Ok(WriteOutcome::Saved)
            }
            None => Err(ResourceError::MissingId {
                method: Method::Get,
            }),
        }
    }

    /// Deletes the remote object and clears the bag, whatever the outcome.
    #[instrument(skip(self), fields(resource = R::RESOURCE_PATH))]
    pub async fn delete(&mut self) -> Result<bool, ResourceError> {
        let Some(id) = self.properties.id()? else {
            warn!("delete on an instance without id");
            return Err(ResourceError::Unsupported(NON_EXISTENT));
        };

        let path = R::item_path(id);
        let parameters = self.request_parameters(Parameters::new());
        let response = self
            .client
            .request(&path, Method::Delete, parameters.as_ref())
            .await;
        self.clear_properties();
        let response = response?;

        if response.is_error() {
            warn!(%path, status = response.status(), "Delete failed");
            Ok(false)
        } else {
            info!(%path, "Deleted");
            Ok(true)
        }
    }
}

impl<R: ResourceRecord, C: RestClient> std::fmt::Debug for InstanceResource<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceResource")
            .field("resource", &R::RESOURCE_PATH)
            .field("properties", &self.properties)
            .field("parameters", &self.parameters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        label: String,
    }

    impl ResourceRecord for Widget {
        const RESOURCE_PATH: &'static str = "/widgets";
    }

    fn widget(mock: &Arc<MockTransport>) -> InstanceResource<Widget, MockTransport> {
        InstanceResource::new(mock.clone())
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Post, "/widgets").return_status(201, json!({"id": 3}));
        mock.expect(Method::Get, "/widgets/3").return_ok(json!({"id": 3, "label": "a"}));

        let mut w = widget(&mock);
        assert_eq!(w.state(), InstanceState::Empty);
        w.set_property("label", "a");
        assert_eq!(w.state(), InstanceState::Draft);
        assert_eq!(w.create_or_update().await.unwrap(), WriteOutcome::Saved);
        assert_eq!(w.state(), InstanceState::Loaded);
        w.set_property("label", "b");
        assert_eq!(w.state(), InstanceState::Mutated);
        w.clear_properties();
        assert_eq!(w.state(), InstanceState::Empty);
        mock.verify();
    }

    #[tokio::test]
    async fn test_remove_property_marks_dirty_only_on_removal() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Get, "/widgets/4")
            .return_ok(json!({"id": 4, "label": "a", "color": "red"}));

        let mut w = widget(&mock);
        w.get(4).await.unwrap();
        assert_eq!(w.remove_property("missing"), None);
        assert_eq!(w.state(), InstanceState::Loaded);
        assert_eq!(w.remove_property("color"), Some(json!("red")));
        assert_eq!(w.property("color"), None);
        assert_eq!(w.state(), InstanceState::Mutated);
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_error_still_replaces_properties() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Get, "/widgets/8")
            .return_status(404, json!({"code": 404, "message": "Resource not found"}));

        let mut w = widget(&mock);
        assert!(!w.get(8).await.unwrap());
        assert_eq!(w.property("message"), Some(&json!("Resource not found")));
        assert_eq!(w.id().unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_transport_error_propagates() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Get, "/widgets/1").return_transport_error("timed out");

        let mut w = widget(&mock);
        let err = w.get(1).await.unwrap_err();
        assert!(matches!(err, ResourceError::Transport(_)));
        assert!(!err.is_unsupported());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_local_state() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Post, "/widgets")
            .return_status(400, json!({"message": "label is required"}));

        let mut w = widget(&mock);
        w.set_property("colour", "red");
        let outcome = w.create_or_update().await.unwrap();
        assert_eq!(outcome, WriteOutcome::WriteFailed { status: 400 });
        assert!(!outcome.is_saved());
        assert_eq!(w.property("colour"), Some(&json!("red")));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_refetch_failure_is_reported() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Post, "/widgets").return_status(201, json!({"id": 4}));
        mock.expect(Method::Get, "/widgets/4").return_status(404, json!({}));

        let mut w = widget(&mock);
        w.set_property("label", "x");
        assert_eq!(
            w.create_or_update().await.unwrap(),
            WriteOutcome::RefetchFailed { status: 404 }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_post_without_id_is_protocol_error() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Post, "/widgets").return_status(201, json!({"label": "x"}));

        let mut w = widget(&mock);
        w.set_property("label", "x");
        let err = w.create_or_update().await.unwrap_err();
        assert!(matches!(err, ResourceError::MissingId { method: Method::Post }));
        // No refetch was attempted.
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_post_with_string_id_is_parsed() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Post, "/widgets").return_status(201, json!({"id": "12"}));
        mock.expect(Method::Get, "/widgets/12").return_ok(json!({"id": "12", "label": "x"}));

        let mut w = widget(&mock);
        w.set_property("label", "x");
        assert!(w.create_or_update().await.unwrap().is_saved());
        assert_eq!(w.property("id"), Some(&json!(12)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_put_without_id_in_response_uses_local_id() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Put, "/widgets/5").return_status(204, Value::Null);
        mock.expect(Method::Get, "/widgets/5").return_ok(json!({"id": 5, "label": "y"}));

        let mut w = InstanceResource::<Widget, _>::with_properties(
            mock.clone(),
            json!({"id": 5, "label": "y"}).as_object().unwrap(),
        );
        assert!(w.create_or_update().await.unwrap().is_saved());
        mock.verify();
    }

    #[tokio::test]
    async fn test_refetch_without_id_is_protocol_error() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Post, "/widgets").return_status(201, json!({"id": 6}));
        mock.expect(Method::Get, "/widgets/6").return_ok(json!({"label": "z"}));

        let mut w = widget(&mock);
        w.set_property("label", "z");
        let err = w.create_or_update().await.unwrap_err();
        assert!(matches!(err, ResourceError::MissingId { method: Method::Get }));
    }

    #[tokio::test]
    async fn test_invalid_local_id_fails_before_request() {
        let mock = Arc::new(MockTransport::new());
        let mut w = widget(&mock);
        w.set_property("id", "seven");
        assert!(matches!(
            w.create_or_update().await,
            Err(ResourceError::InvalidId(_))
        ));
        assert!(matches!(w.delete().await, Err(ResourceError::InvalidId(_))));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_clears_even_on_transport_error() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Delete, "/widgets/2").return_transport_error("reset");

        let mut w = InstanceResource::<Widget, _>::with_properties(
            mock.clone(),
            json!({"id": 2}).as_object().unwrap(),
        );
        assert!(matches!(w.delete().await, Err(ResourceError::Transport(_))));
        assert!(w.properties().is_empty());
    }

    #[tokio::test]
    async fn test_delete_error_flag_returns_false() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Delete, "/widgets/2").return_status(404, json!({}));

        let mut w = InstanceResource::<Widget, _>::with_properties(
            mock.clone(),
            json!({"id": 2}).as_object().unwrap(),
        );
        assert!(!w.delete().await.unwrap());
        assert!(w.properties().is_empty());
    }

    #[tokio::test]
    async fn test_scratch_parameters_are_merged() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Get, "/widgets/1").return_ok(json!({"id": 1, "label": "a"}));
        mock.expect(Method::Put, "/widgets/1").return_ok(json!({"id": 1}));
        mock.expect(Method::Get, "/widgets/1").return_ok(json!({"id": 1, "label": "b"}));

        let mut w = widget(&mock);
        w.set_parameter("fields", "id,label");
        w.set_parameter("label", "ignored");
        w.get(1).await.unwrap();
        w.set_property("label", "b");
        w.create_or_update().await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].form(), "fields=id%2Clabel&label=ignored");
        // Property values win over scratch parameters.
        assert_eq!(calls[1].form(), "fields=id%2Clabel&id=1&label=b");

        w.clear_parameters();
        assert!(w.parameters().is_empty());
        assert_eq!(w.parameter("fields"), None);
    }

    #[tokio::test]
    async fn test_no_parameters_sent_when_empty() {
        let mock = Arc::new(MockTransport::new());
        mock.expect(Method::Get, "/widgets/1").return_ok(json!({"id": 1}));

        let mut w = widget(&mock);
        w.get(1).await.unwrap();
        assert_eq!(mock.calls()[0].parameters, None);
    }

    #[test]
    fn test_record_conversion() {
        let mock = Arc::new(MockTransport::new());
        let record = Widget {
            id: None,
            label: "gear".into(),
        };
        let w = InstanceResource::from_record(mock, &record).unwrap();
        assert_eq!(w.property("label"), Some(&json!("gear")));
        assert_eq!(w.property("id"), None);
        assert_eq!(w.record().unwrap(), record);
        assert_eq!(w.resource_path(), "/widgets");
    }

    #[test]
    fn test_seed_is_a_copy() {
        let mock = Arc::new(MockTransport::new());
        let mut seed = json!({"label": "a"}).as_object().cloned().unwrap();
        let w = InstanceResource::<Widget, _>::with_properties(mock, &seed);
        seed.insert("label".into(), json!("changed"));
        assert_eq!(w.property("label"), Some(&json!("a")));
    }
}

//! # InstanceClient Trait
//!
//! Provides the CRUD lifecycle to resource-specific handles (`Contact`,
//! `Template`, …) by forwarding to the [`InstanceResource`] they wrap.
use crate::framework::{InstanceResource, InstanceState, ResourceError, ResourceRecord, RestClient, WriteOutcome};
use async_trait::async_trait;

/// Trait for resource-specific handles to inherit the standard lifecycle.
///
/// Implementors only provide access to the engine; `get`, `create_or_update`
/// and `delete` come for free.
#[async_trait]
pub trait InstanceClient<R: ResourceRecord, C: RestClient + 'static>: Send + Sync {
    /// Access the wrapped engine.
    fn inner(&self) -> &InstanceResource<R, C>;

    fn inner_mut(&mut self) -> &mut InstanceResource<R, C>;

    /// Load item `id` into this (empty) handle.
    #[tracing::instrument(skip(self))]
    async fn get(&mut self, id: i64) -> Result<bool, ResourceError> {
        tracing::debug!("Sending request");
        self.inner_mut().get(id).await
    }

    /// Save local changes and adopt the server copy.
    #[tracing::instrument(skip(self))]
    async fn create_or_update(&mut self) -> Result<WriteOutcome, ResourceError> {
        tracing::debug!("Sending request");
        self.inner_mut().create_or_update().await
    }

    /// Delete the remote object and clear this handle.
    #[tracing::instrument(skip(self))]
    async fn delete(&mut self) -> Result<bool, ResourceError> {
        tracing::debug!("Sending request");
        self.inner_mut().delete().await
    }

    fn id(&self) -> Result<Option<i64>, ResourceError> {
        self.inner().id()
    }

    fn state(&self) -> InstanceState {
        self.inner().state()
    }

    /// Snapshot of the properties as the typed record.
    fn record(&self) -> Result<R, ResourceError> {
        self.inner().record()
    }
}

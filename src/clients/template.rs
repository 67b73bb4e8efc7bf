use crate::clients::accessors::{date_properties, text_properties};
use crate::clients::InstanceClient;
use crate::domain::TemplateRecord;
use crate::framework::{InstanceResource, ResourceError, RestClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Handle for one message template at `/templates/{id}`.
pub struct Template<C: RestClient> {
    inner: InstanceResource<TemplateRecord, C>,
}

#[async_trait]
impl<C: RestClient + 'static> InstanceClient<TemplateRecord, C> for Template<C> {
    fn inner(&self) -> &InstanceResource<TemplateRecord, C> {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut InstanceResource<TemplateRecord, C> {
        &mut self.inner
    }
}

impl<C: RestClient> Template<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            inner: InstanceResource::new(client),
        }
    }

    pub fn from_record(client: Arc<C>, record: &TemplateRecord) -> Result<Self, ResourceError> {
        Ok(Self {
            inner: InstanceResource::from_record(client, record)?,
        })
    }

    text_properties!(name, content);
    date_properties!(last_modified);

    /// Number of characters in the template body.
    pub fn length(&self) -> usize {
        self.content().map(|c| c.chars().count()).unwrap_or(0)
    }
}

use crate::clients::accessors::{date_properties, text_properties};
use crate::clients::InstanceClient;
use crate::domain::ContactRecord;
use crate::framework::{InstanceResource, ResourceError, RestClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Handle for one contact at `/contacts/{id}`.
pub struct Contact<C: RestClient> {
    inner: InstanceResource<ContactRecord, C>,
}

#[async_trait]
impl<C: RestClient + 'static> InstanceClient<ContactRecord, C> for Contact<C> {
    fn inner(&self) -> &InstanceResource<ContactRecord, C> {
        &self.inner
    }

    fn inner_mut(&mut self) -> &mut InstanceResource<ContactRecord, C> {
        &mut self.inner
    }
}

impl<C: RestClient> Contact<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            inner: InstanceResource::new(client),
        }
    }

    /// Draft contact seeded from a record (no request is sent).
    pub fn from_record(client: Arc<C>, record: &ContactRecord) -> Result<Self, ResourceError> {
        Ok(Self {
            inner: InstanceResource::from_record(client, record)?,
        })
    }

    text_properties!(first_name, last_name, phone, email, company_name);
    date_properties!(created_at, updated_at);
}

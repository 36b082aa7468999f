//! The provisioning client trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::wire::{CreateInstanceRequest, RemoteInstance};

/// Client for the remote provisioning API.
///
/// This is the seam the reconciler drives: one call per remote operation,
/// no retry or polling logic of its own. Implementations must be safe for
/// concurrent use by independent reconciliation operations (`Send + Sync`),
/// and must map a structured "does not exist" response to
/// [`ClientError::NotFound`] so callers can tell confirmed absence apart
/// from transport failures.
#[async_trait]
pub trait ProvisioningClient: Send + Sync {
    /// Submits an instance creation request.
    ///
    /// Returns the identifier assigned by the remote API. The instance is
    /// usually not usable yet when this returns; callers poll
    /// [`get_instance`](Self::get_instance) until its status is active.
    async fn create_instance(&self, request: &CreateInstanceRequest)
    -> Result<String, ClientError>;

    /// Fetches the current remote view of an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the remote API reports the
    /// instance unknown.
    async fn get_instance(&self, id: &str) -> Result<RemoteInstance, ClientError>;

    /// Submits an instance deletion request.
    ///
    /// Deletion is asynchronous remotely; callers poll
    /// [`get_instance`](Self::get_instance) until it reports not found.
    async fn delete_instance(&self, id: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl<C> ProvisioningClient for Arc<C>
where
    C: ProvisioningClient + ?Sized,
{
    async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> Result<String, ClientError> {
        (**self).create_instance(request).await
    }

    async fn get_instance(&self, id: &str) -> Result<RemoteInstance, ClientError> {
        (**self).get_instance(id).await
    }

    async fn delete_instance(&self, id: &str) -> Result<(), ClientError> {
        (**self).delete_instance(id).await
    }
}

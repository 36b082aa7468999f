//! The lifecycle reconciler.

use std::str::FromStr;

use simplehost_client::{ClientError, CreateInstanceRequest, ProvisioningClient, RemoteInstance};
use simplehost_core::{InstanceState, InvalidAttribute};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ReconcileError;
use crate::retry::{PollDecision, PollError, RetryPolicy, poll_until};

/// Drives create/read/delete for one instance at a time against the remote
/// provisioning API.
///
/// The client is injected explicitly and may be shared (e.g. an `Arc`)
/// across reconcilers; the reconciler itself holds no cross-operation
/// mutable state. Each operation owns its [`InstanceState`] exclusively for
/// the duration of the call, and the authoritative state always lives in
/// the remote API.
pub struct Reconciler<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C> Reconciler<C>
where
    C: ProvisioningClient,
{
    /// Creates a reconciler with the default retry policy.
    pub fn new(client: C) -> Self {
        Self::with_policy(client, RetryPolicy::default())
    }

    /// Creates a reconciler with an explicit retry policy.
    pub fn with_policy(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// The retry policy governing this reconciler's poll loops.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Creates the remote instance described by `state` and waits until it
    /// is active.
    ///
    /// The identifier returned by the remote API is bound to `state` before
    /// any polling starts, so a later timeout or cancellation never orphans
    /// an unidentified remote instance: the caller keeps the id and can
    /// re-poll via [`read`](Self::read) or destroy via
    /// [`delete`](Self::delete).
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::AlreadyBound`] if `state` already carries an
    ///   identifier; creating again would orphan that instance.
    /// - [`ReconcileError::CreationFailed`] if the remote API rejects the
    ///   request (no id bound).
    /// - [`ReconcileError::ProvisioningLookupFailed`] if a status lookup
    ///   fails after the id was assigned; this is treated as fatal, not
    ///   transient.
    /// - [`ReconcileError::ProvisioningTimedOut`] if the ceiling elapses
    ///   before the instance is active.
    /// - [`ReconcileError::Cancelled`] if `cancel` fires mid-poll.
    pub async fn create(
        &self,
        state: &mut InstanceState,
        cancel: &CancellationToken,
    ) -> Result<(), ReconcileError> {
        if let Some(id) = state.id() {
            return Err(ReconcileError::AlreadyBound { id: id.to_string() });
        }
        let request = CreateInstanceRequest::new(
            state.name.clone(),
            state.location,
            state.size,
            state.database_engine,
            state.language,
        );
        let id = self
            .client
            .create_instance(&request)
            .await
            .map_err(ReconcileError::creation_failed)?;
        info!(id = %id, name = %state.name, "instance creation accepted");
        state.bind_id(&id);

        let outcome: Result<(), PollError<ClientError>> = {
            let client = &self.client;
            let id = id.as_str();
            poll_until(self.policy, cancel, move || async move {
                match client.get_instance(id).await {
                    Ok(instance) if instance.status.is_active() => PollDecision::Done(()),
                    Ok(instance) => {
                        debug!(id = %id, status = %instance.status, "instance not yet active");
                        PollDecision::Retry(instance.status.to_string())
                    }
                    Err(err) => PollDecision::Fatal(err),
                }
            })
            .await
        };

        match outcome {
            Ok(()) => {}
            Err(PollError::Fatal(source)) => {
                return Err(ReconcileError::provisioning_lookup_failed(id, source));
            }
            Err(PollError::TimedOut { last }) => {
                warn!(id = %id, last_status = %last, "provisioning ceiling elapsed");
                return Err(ReconcileError::ProvisioningTimedOut {
                    id,
                    last_status: last,
                });
            }
            Err(PollError::Cancelled) => return Err(ReconcileError::Cancelled { id }),
        }

        info!(id = %id, "instance is active");
        self.read(state).await
    }

    /// Refreshes `state` from the authoritative remote view.
    ///
    /// Every mirrored field is overwritten: name, size, location (from the
    /// datacenter descriptor), database engine and language (from their
    /// nested descriptors).
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::Unbound`] if `state` has no bound id.
    /// - [`ReconcileError::ResourceNotFound`] if the instance is unknown
    ///   remotely or the lookup fails; the caller should drop the record.
    /// - [`ReconcileError::FieldSync`] if a remote attribute falls outside
    ///   its closed set; the record may be partially stale.
    pub async fn read(&self, state: &mut InstanceState) -> Result<(), ReconcileError> {
        let id = state.id().ok_or(ReconcileError::Unbound)?.to_string();
        let found = self.client.get_instance(&id).await.map_err(|source| {
            warn!(id = %id, error = %source, "instance lookup failed during read");
            ReconcileError::resource_not_found(&id, source)
        })?;
        apply_remote(state, &id, found)
    }

    /// Re-attaches to an existing remote instance by bare identifier.
    ///
    /// Supports pass-through import of an instance this process did not
    /// create: the identifier is the sole input, everything else comes from
    /// the remote API.
    pub async fn import(&self, id: &str) -> Result<InstanceState, ReconcileError> {
        let found = self.client.get_instance(id).await.map_err(|source| {
            warn!(id = %id, error = %source, "instance lookup failed during import");
            ReconcileError::resource_not_found(id, source)
        })?;

        let mut state = InstanceState::desired(
            found.name.clone(),
            parse_field(id, &found.size)?,
            parse_field(id, &found.database.name)?,
            parse_field(id, &found.language.name)?,
            parse_field(id, &found.datacenter.region)?,
        );
        state.bind_id(&found.id);
        Ok(state)
    }

    /// Deletes the remote instance bound to `state` and waits until the
    /// remote API confirms it is gone.
    ///
    /// The polling predicate is the inverse of creation's: a structured
    /// not-found lookup is the success signal, a still-visible instance is
    /// the retryable condition. Other lookup errors are retried too rather
    /// than being taken as confirmation of absence. The record's id is
    /// cleared only on confirmed absence.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::Unbound`] if `state` has no bound id.
    /// - [`ReconcileError::DeletionFailed`] if the remote API rejects the
    ///   deletion request; id retained.
    /// - [`ReconcileError::DeletionTimedOut`] if the ceiling elapses while
    ///   the instance is still visible; id retained, outcome ambiguous.
    /// - [`ReconcileError::Cancelled`] if `cancel` fires mid-poll.
    pub async fn delete(
        &self,
        state: &mut InstanceState,
        cancel: &CancellationToken,
    ) -> Result<(), ReconcileError> {
        let id = state.id().ok_or(ReconcileError::Unbound)?.to_string();
        self.client
            .delete_instance(&id)
            .await
            .map_err(|source| ReconcileError::deletion_failed(&id, source))?;
        info!(id = %id, "instance deletion accepted");

        let outcome: Result<(), PollError<ClientError>> = {
            let client = &self.client;
            let id = id.as_str();
            poll_until(self.policy, cancel, move || async move {
                match client.get_instance(id).await {
                    Err(err) if err.is_not_found() => PollDecision::Done(()),
                    Err(err) => {
                        warn!(id = %id, error = %err, "lookup failed while waiting for deletion");
                        PollDecision::Retry(format!("lookup failed: {err}"))
                    }
                    Ok(instance) => {
                        debug!(id = %id, status = %instance.status, "instance still visible");
                        PollDecision::Retry(format!("still visible with status {}", instance.status))
                    }
                }
            })
            .await
        };

        match outcome {
            Ok(()) => {
                info!(id = %id, "instance deletion confirmed");
                state.clear_id();
                Ok(())
            }
            Err(PollError::TimedOut { last }) => {
                warn!(id = %id, last = %last, "deletion ceiling elapsed");
                Err(ReconcileError::DeletionTimedOut { id })
            }
            Err(PollError::Cancelled) => Err(ReconcileError::Cancelled { id }),
            // The delete predicate never reports fatal, but the arm keeps
            // the mapping total.
            Err(PollError::Fatal(source)) => Err(ReconcileError::deletion_failed(id, source)),
        }
    }
}

/// Overwrites every mirrored field of `state` from the remote view.
///
/// Assignments run in a fixed order and the first mapping failure aborts
/// with a field-specific error, so the caller knows exactly which attribute
/// could not be synchronized.
fn apply_remote(
    state: &mut InstanceState,
    id: &str,
    found: RemoteInstance,
) -> Result<(), ReconcileError> {
    state.name = found.name;
    state.size = parse_field(id, &found.size)?;
    state.location = parse_field(id, &found.datacenter.region)?;
    state.database_engine = parse_field(id, &found.database.name)?;
    state.language = parse_field(id, &found.language.name)?;
    Ok(())
}

fn parse_field<T>(id: &str, raw: &str) -> Result<T, ReconcileError>
where
    T: FromStr<Err = InvalidAttribute>,
{
    raw.parse()
        .map_err(|source| ReconcileError::field_sync(id, source))
}

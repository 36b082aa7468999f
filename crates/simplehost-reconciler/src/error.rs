//! Reconciliation error taxonomy.

use simplehost_client::ClientError;
use simplehost_core::InvalidAttribute;
use thiserror::Error;

/// Errors that can occur while reconciling an instance.
///
/// Every failure carries enough context (identifier, last observed status)
/// for the caller to decide whether to retry the whole operation, abandon
/// it, or intervene on the remote resource by hand. [`retains_id`]
/// distinguishes the failures that leave the record attached to a live (or
/// possibly live) remote instance from those after which the record should
/// be dropped.
///
/// [`retains_id`]: ReconcileError::retains_id
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The remote API rejected the creation request; no identifier was bound.
    #[error("remote API rejected instance creation: {source}")]
    CreationFailed {
        #[source]
        source: ClientError,
    },

    /// A lookup failed while waiting for provisioning to finish.
    ///
    /// The instance has an identifier, so a failing lookup signals an
    /// inconsistency between local and remote state rather than a transient
    /// condition; no retry is attempted.
    #[error("lookup of instance '{id}' failed while waiting for provisioning: {source}")]
    ProvisioningLookupFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    /// The ceiling elapsed before the instance became active.
    ///
    /// The instance may still finish provisioning remotely; the identifier
    /// stays bound so the caller can re-poll or destroy.
    #[error("instance '{id}' did not become active before the ceiling elapsed (last status: {last_status})")]
    ProvisioningTimedOut { id: String, last_status: String },

    /// The instance no longer exists remotely.
    #[error("instance '{id}' no longer exists remotely: {source}")]
    ResourceNotFound {
        id: String,
        #[source]
        source: ClientError,
    },

    /// A remote attribute could not be mapped into the local record.
    ///
    /// The record may be partially stale: fields synchronized before the
    /// failing one already hold fresh values.
    #[error("failed to synchronize field '{field}' for instance '{id}': {source}")]
    FieldSync {
        id: String,
        field: &'static str,
        #[source]
        source: InvalidAttribute,
    },

    /// The remote API rejected the deletion request; the identifier stays
    /// bound.
    #[error("remote API rejected deletion of instance '{id}': {source}")]
    DeletionFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    /// The ceiling elapsed while the instance was still visible.
    ///
    /// Whether the deletion will still complete is unknown; the identifier
    /// stays bound.
    #[error("instance '{id}' was still visible when the deletion ceiling elapsed")]
    DeletionTimedOut { id: String },

    /// The caller cancelled an in-flight poll loop.
    #[error("operation on instance '{id}' was cancelled by the caller")]
    Cancelled { id: String },

    /// Create was invoked on a record already bound to a remote instance.
    ///
    /// An identifier is bound exactly once; creating again would orphan
    /// the existing instance. The caller should read or delete instead.
    #[error("state record is already bound to instance '{id}'")]
    AlreadyBound { id: String },

    /// Read or delete was invoked on a record with no bound identifier.
    #[error("state record has no bound identifier")]
    Unbound,
}

impl ReconcileError {
    /// Creates a new `CreationFailed` error.
    #[must_use]
    pub fn creation_failed(source: ClientError) -> Self {
        Self::CreationFailed { source }
    }

    /// Creates a new `ProvisioningLookupFailed` error.
    #[must_use]
    pub fn provisioning_lookup_failed(id: impl Into<String>, source: ClientError) -> Self {
        Self::ProvisioningLookupFailed {
            id: id.into(),
            source,
        }
    }

    /// Creates a new `ResourceNotFound` error.
    #[must_use]
    pub fn resource_not_found(id: impl Into<String>, source: ClientError) -> Self {
        Self::ResourceNotFound {
            id: id.into(),
            source,
        }
    }

    /// Creates a new `FieldSync` error.
    #[must_use]
    pub fn field_sync(id: impl Into<String>, source: InvalidAttribute) -> Self {
        Self::FieldSync {
            id: id.into(),
            field: source.field,
            source,
        }
    }

    /// Creates a new `DeletionFailed` error.
    #[must_use]
    pub fn deletion_failed(id: impl Into<String>, source: ClientError) -> Self {
        Self::DeletionFailed {
            id: id.into(),
            source,
        }
    }

    /// The identifier involved in this failure, when one was bound.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::CreationFailed { .. } | Self::Unbound => None,
            Self::ProvisioningLookupFailed { id, .. }
            | Self::ProvisioningTimedOut { id, .. }
            | Self::ResourceNotFound { id, .. }
            | Self::FieldSync { id, .. }
            | Self::DeletionFailed { id, .. }
            | Self::DeletionTimedOut { id }
            | Self::Cancelled { id }
            | Self::AlreadyBound { id } => Some(id),
        }
    }

    /// Whether the failure leaves the record attached to a remote instance
    /// that does (or may) still exist.
    pub fn retains_id(&self) -> bool {
        match self {
            Self::CreationFailed { .. } | Self::ResourceNotFound { .. } | Self::Unbound => false,
            Self::ProvisioningLookupFailed { .. }
            | Self::ProvisioningTimedOut { .. }
            | Self::FieldSync { .. }
            | Self::DeletionFailed { .. }
            | Self::DeletionTimedOut { .. }
            | Self::Cancelled { .. }
            | Self::AlreadyBound { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_reports_last_observed_status() {
        let err = ReconcileError::ProvisioningTimedOut {
            id: "abc123".into(),
            last_status: "provisioning".into(),
        };
        assert_eq!(err.id(), Some("abc123"));
        assert!(err.retains_id());
        assert!(err.to_string().contains("last status: provisioning"));
    }

    #[test]
    fn creation_failure_binds_nothing() {
        let err = ReconcileError::creation_failed(ClientError::api(400, "invalid size"));
        assert_eq!(err.id(), None);
        assert!(!err.retains_id());
    }

    #[test]
    fn not_found_drops_the_record() {
        let err = ReconcileError::resource_not_found("abc123", ClientError::not_found("abc123"));
        assert_eq!(err.id(), Some("abc123"));
        assert!(!err.retains_id());
    }

    #[test]
    fn ambiguous_outcomes_retain_the_id() {
        let deletion = ReconcileError::DeletionTimedOut { id: "abc123".into() };
        assert!(deletion.retains_id());

        let cancelled = ReconcileError::Cancelled { id: "abc123".into() };
        assert!(cancelled.retains_id());

        let bound = ReconcileError::AlreadyBound { id: "abc123".into() };
        assert!(bound.retains_id());
        assert_eq!(bound.id(), Some("abc123"));
    }
}

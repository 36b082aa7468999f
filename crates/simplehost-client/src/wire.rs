//! Wire types for the provisioning API.
//!
//! These structs mirror the remote API's JSON exactly, nested descriptors
//! included. The reconciler flattens [`RemoteInstance`] into the local
//! state record; it never stores these types beyond a single pass.

use std::fmt;

use serde::{Deserialize, Serialize};
use simplehost_core::{DatabaseEngine, InstanceSize, Language, Location};

/// Body of a `POST /simplehosting/instances` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInstanceRequest {
    pub name: String,
    pub location: Location,
    pub size: InstanceSize,
    #[serde(rename = "type")]
    pub instance_type: InstanceTypeRequest,
}

/// The nested `type` object of a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTypeRequest {
    pub database: DatabaseDescriptor,
    pub language: LanguageDescriptor,
}

impl CreateInstanceRequest {
    /// Builds a creation request from typed desired attributes.
    pub fn new(
        name: impl Into<String>,
        location: Location,
        size: InstanceSize,
        database_engine: DatabaseEngine,
        language: Language,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            size,
            instance_type: InstanceTypeRequest {
                database: DatabaseDescriptor {
                    name: database_engine.to_string(),
                },
                language: LanguageDescriptor {
                    name: language.to_string(),
                },
            },
        }
    }
}

/// An instance as observed from the remote API.
///
/// Owned entirely by the remote side; attribute fields arrive as strings
/// and are only mapped into their closed sets when synchronized into an
/// `InstanceState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInstance {
    pub id: String,
    pub name: String,
    pub size: String,
    pub status: InstanceStatus,
    pub datacenter: Datacenter,
    pub database: DatabaseDescriptor,
    pub language: LanguageDescriptor,
}

/// Nested datacenter descriptor of a remote instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    pub region: String,
}

/// Nested database descriptor of a remote instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDescriptor {
    pub name: String,
}

/// Nested language descriptor of a remote instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub name: String,
}

/// Remote provisioning status of an instance.
///
/// Only `active` is terminal for creation; everything else (for example
/// `provisioning`) is transient and passes through verbatim so errors can
/// report the last observed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceStatus(String);

impl InstanceStatus {
    /// The terminal status signalling provisioning completion.
    pub const ACTIVE: &'static str = "active";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Whether the instance has finished provisioning.
    pub fn is_active(&self) -> bool {
        self.0 == Self::ACTIVE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_wire_shape() {
        let request = CreateInstanceRequest::new(
            "site1",
            Location::FR,
            InstanceSize::Medium,
            DatabaseEngine::Mysql,
            Language::Php,
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "site1",
                "location": "FR",
                "size": "m",
                "type": {
                    "database": { "name": "mysql" },
                    "language": { "name": "php" }
                }
            })
        );
    }

    #[test]
    fn remote_instance_decodes_nested_descriptors() {
        let instance: RemoteInstance = serde_json::from_str(
            r#"{
                "id": "abc123",
                "name": "site1",
                "size": "m",
                "status": "provisioning",
                "datacenter": { "region": "FR" },
                "database": { "name": "mysql" },
                "language": { "name": "php" }
            }"#,
        )
        .unwrap();

        assert_eq!(instance.id, "abc123");
        assert_eq!(instance.datacenter.region, "FR");
        assert_eq!(instance.database.name, "mysql");
        assert_eq!(instance.language.name, "php");
        assert!(!instance.status.is_active());
    }

    #[test]
    fn status_terminality() {
        assert!(InstanceStatus::new("active").is_active());
        assert!(!InstanceStatus::new("provisioning").is_active());
        assert_eq!(InstanceStatus::new("deleting").to_string(), "deleting");
    }
}

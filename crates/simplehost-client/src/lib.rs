//! # simplehost-client
//!
//! Client for the SimpleHost remote provisioning API.
//!
//! The main trait is [`ProvisioningClient`], the seam between the lifecycle
//! reconciler and the remote API. [`HttpProvisioningClient`] is the real
//! implementation; tests substitute their own fakes.
//!
//! ## Example
//!
//! ```ignore
//! use simplehost_client::{ClientConfig, HttpProvisioningClient, ProvisioningClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = HttpProvisioningClient::new(config)?;
//! let instance = client.get_instance("abc123").await?;
//! println!("{} is {}", instance.name, instance.status);
//! ```

mod config;
mod error;
mod http;
mod traits;
mod wire;

pub use config::{API_KEY_ENV, BASE_URL_ENV, ClientConfig};
pub use error::ClientError;
pub use http::HttpProvisioningClient;
pub use traits::ProvisioningClient;
pub use wire::{
    CreateInstanceRequest, Datacenter, DatabaseDescriptor, InstanceStatus, InstanceTypeRequest,
    LanguageDescriptor, RemoteInstance,
};

//! # simplehost-reconciler
//!
//! Lifecycle reconciler for SimpleHost instances.
//!
//! The remote provisioning API is asynchronous and eventually consistent:
//! a creation request is accepted long before the instance is usable, and a
//! deletion request is accepted long before the instance is gone. The
//! [`Reconciler`] bridges that gap with bounded retry-polling:
//!
//! - **Create** submits the request, binds the returned identifier to the
//!   local record immediately, then polls until the instance is active.
//! - **Read** refreshes the local record from the authoritative remote view.
//! - **Delete** submits the request, then polls until the remote API
//!   confirms the instance no longer exists.
//!
//! Both poll loops share one primitive ([`retry::poll_until`]) bounded by a
//! [`RetryPolicy`] ceiling and observable through a caller-supplied
//! cancellation token; only the "what counts as done" predicate differs.
//!
//! ## Example
//!
//! ```ignore
//! use simplehost_client::{ClientConfig, HttpProvisioningClient};
//! use simplehost_core::{DatabaseEngine, InstanceSize, InstanceState, Language, Location};
//! use simplehost_reconciler::Reconciler;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = HttpProvisioningClient::new(ClientConfig::from_env()?)?;
//! let reconciler = Reconciler::new(client);
//!
//! let mut state = InstanceState::desired(
//!     "site1",
//!     InstanceSize::Medium,
//!     DatabaseEngine::Mysql,
//!     Language::Php,
//!     Location::FR,
//! );
//! reconciler.create(&mut state, &CancellationToken::new()).await?;
//! ```

mod error;
mod reconciler;
pub mod retry;

pub use error::ReconcileError;
pub use reconciler::Reconciler;
pub use retry::RetryPolicy;

//! # simplehost-core
//!
//! Core domain model for SimpleHost instance reconciliation.
//!
//! This crate defines the typed attributes of a hosting instance and the
//! [`InstanceState`] record that mirrors one managed instance locally. It
//! contains no I/O - the provisioning client and the reconciler live in
//! separate crates.
//!
//! ## Overview
//!
//! An instance is described by a closed set of attributes, all immutable
//! after creation:
//! - [`InstanceSize`] - the plan tier (`s+`, `m`, `l`, `xxl`)
//! - [`DatabaseEngine`] - the database type (`mysql`, `pgsql`)
//! - [`Language`] - the runtime language (`php`, `python`, `nodejs`, `ruby`)
//! - [`Location`] - the datacenter region (`FR`, `LU`)
//!
//! [`InstanceState`] carries those attributes plus the identifier assigned
//! by the remote API. The record is a read-through mirror: once an id is
//! bound, its fields track the values last observed remotely.

mod attributes;
mod state;

pub use attributes::{DatabaseEngine, InstanceSize, InvalidAttribute, Language, Location};
pub use state::InstanceState;

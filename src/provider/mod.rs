//! # Provider module
//! Contains the [Provider] client and its operation implementations.

#[allow(clippy::module_inception)]
mod provider;

mod flows;
mod helpers;
mod provider_impl;

pub use provider::Provider;

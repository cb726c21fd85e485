// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, secret storage, and namespace selection.

pub mod client;
pub mod namespaces;
pub mod secrets;

pub use client::create_client;
pub use namespaces::resolve_namespaces;
pub use secrets::{KubeSecretStore, SecretStore};

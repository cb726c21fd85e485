// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry credential sources.

pub mod ecr;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

#[cfg(test)]
use mockall::automock;

pub use ecr::EcrCredentialSource;

/// Short-lived registry login produced once per run
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryCredential {
    pub username: String,
    pub password: String,
    /// Registry endpoint the credential is valid for
    pub server: String,
}

impl fmt::Debug for RegistryCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server", &self.server)
            .finish()
    }
}

/// Something that can issue a registry login.
///
/// Implementations make exactly one outbound call per `fetch` and do not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn fetch(&self) -> Result<RegistryCredential>;
}

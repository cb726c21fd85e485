// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenewError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to fetch registry credentials: {0}")]
    CredentialFetchError(String),

    #[error("Failed to list namespaces: {0}")]
    NamespaceListError(String),

    #[error("Failed to write secret in namespace {namespace}: {message}")]
    SecretWriteError { namespace: String, message: String },

    #[error("Failed to create Docker login secrets in namespaces: {}", .0.join(", "))]
    NamespacesFailed(Vec<String>),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to serialize docker config: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RenewError {
    /// Tag an error with the namespace whose secret write it interrupted.
    pub fn secret_write(namespace: &str, source: impl std::fmt::Display) -> Self {
        RenewError::SecretWriteError {
            namespace: namespace.to_string(),
            message: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenewError>;

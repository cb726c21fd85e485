// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation

use crate::error::{RenewError, Result};
use kube::{Client, Config as KConfig};
use std::time::Duration;
use tracing::{debug, instrument};

/// Create a client from the in-cluster service account, falling back to the
/// local kubeconfig. Every request is bounded by `timeout`.
#[instrument]
pub async fn create_client(timeout: Duration) -> Result<Client> {
    let config = KConfig::infer()
        .await
        .map_err(|e| RenewError::ConfigError(format!("Failed to infer kube config: {}", e)))?;

    debug!("Using cluster {}", config.cluster_url);

    Ok(Client::try_from(with_timeouts(config, timeout))?)
}

fn with_timeouts(mut config: KConfig, timeout: Duration) -> KConfig {
    config.connect_timeout = Some(timeout);
    config.read_timeout = Some(timeout);
    config.write_timeout = Some(timeout);
    config
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecr_login_renew::config::Config;
use ecr_login_renew::credentials::{ecr::load_sdk_config, EcrCredentialSource};
use ecr_login_renew::kubernetes::{create_client, KubeSecretStore};
use ecr_login_renew::sync::{run, summarize};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting ECR login renewal");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: secret_name={}, request_timeout={:?}",
        config.secret_name, config.request_timeout
    );

    let client = create_client(config.request_timeout).await?;
    let sdk_config = load_sdk_config(config.request_timeout).await;

    let credentials = EcrCredentialSource::new(&sdk_config);
    let store = KubeSecretStore::new(client);

    let report = run(&config, &credentials, &store).await?;
    summarize(&report)?;

    info!("Job complete.");
    Ok(())
}

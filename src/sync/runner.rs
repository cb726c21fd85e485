// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One renewal run: fetch the login once and write it to every target namespace.

use crate::config::{parse_annotations, resolve_server_list, Config};
use crate::credentials::CredentialSource;
use crate::error::{RenewError, Result};
use crate::kubernetes::{resolve_namespaces, SecretStore};
use crate::sync::upsert::{upsert_pull_secret, PullSecretTemplate, UpsertAction};
use tracing::{error, info};

/// Result of writing the secret into one namespace
#[derive(Debug)]
pub struct NamespaceOutcome {
    pub namespace: String,
    pub result: Result<UpsertAction>,
}

/// Per-namespace outcomes of a run, in processing order
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<NamespaceOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &NamespaceOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &NamespaceOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}

/// Run the job once.
///
/// Configuration, credential and namespace listing failures abort the run and
/// are returned as errors. Failures writing a single namespace are recorded in
/// the report and do not stop the remaining namespaces.
pub async fn run<C, S>(config: &Config, credentials: &C, store: &S) -> Result<RunReport>
where
    C: CredentialSource + ?Sized,
    S: SecretStore + ?Sized,
{
    // Validated before any outbound call
    let annotations = parse_annotations(config.annotations.as_deref())?;

    info!("Fetching registry credentials...");
    let credential = credentials.fetch().await?;
    info!("Fetched credentials for {}", credential.server);

    if annotations.is_empty() {
        info!("No annotations configured");
    } else {
        info!("Found {} annotations", annotations.len());
    }

    let servers = resolve_server_list(&credential.server, config.registries.as_deref());
    info!("Docker registries: {}", servers.join(","));

    let namespaces = resolve_namespaces(
        store,
        config.target_namespace.as_deref(),
        config.exclude_namespace.as_deref(),
    )
    .await?;
    info!(
        "Updating kubernetes secret [{}] in {} namespaces",
        config.secret_name,
        namespaces.len()
    );

    let template = PullSecretTemplate {
        name: config.secret_name.clone(),
        username: credential.username,
        password: credential.password,
        servers,
        annotations,
    };

    let mut report = RunReport::default();
    for namespace in namespaces {
        let result = upsert_pull_secret(store, &namespace, &template).await;
        match &result {
            Ok(action) => info!("Secret in namespace [{}] {}", namespace, action),
            Err(e) => error!("Updating secret in namespace [{}] failed: {}", namespace, e),
        }
        report.outcomes.push(NamespaceOutcome { namespace, result });
    }

    info!(
        "{} of {} namespaces updated",
        report.succeeded().count(),
        report.outcomes.len()
    );

    Ok(report)
}

/// Turn a finished report into the process outcome
pub fn summarize(report: &RunReport) -> Result<()> {
    if !report.has_failures() {
        return Ok(());
    }

    Err(RenewError::NamespacesFailed(
        report.failed().map(|o| o.namespace.clone()).collect(),
    ))
}

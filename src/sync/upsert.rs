// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update of the pull secret in a single namespace

use crate::config::AnnotationMap;
use crate::constants::docker::{CONFIG_KEY, SECRET_TYPE};
use crate::error::{RenewError, Result};
use crate::kubernetes::SecretStore;
use crate::sync::docker_config::DockerConfig;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Which write path produced the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
    /// In-place update failed and the secret was deleted and created again
    Recreated,
}

impl fmt::Display for UpsertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertAction::Created => write!(f, "created"),
            UpsertAction::Updated => write!(f, "updated"),
            UpsertAction::Recreated => write!(f, "recreated"),
        }
    }
}

/// Everything needed to write the pull secret, shared by all namespaces in a run
#[derive(Clone)]
pub struct PullSecretTemplate {
    pub name: String,
    pub username: String,
    pub password: String,
    pub servers: Vec<String>,
    pub annotations: AnnotationMap,
}

impl PullSecretTemplate {
    fn payload(&self) -> Result<Vec<u8>> {
        DockerConfig::new(&self.username, &self.password, &self.servers).to_json()
    }

    /// A fresh docker-config secret carrying `payload` and the configured annotations
    fn new_secret(&self, namespace: &str, payload: Vec<u8>) -> Secret {
        let annotations = (!self.annotations.is_empty()).then(|| self.annotations.clone());

        Secret {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(namespace.to_string()),
                annotations,
                ..Default::default()
            },
            type_: Some(SECRET_TYPE.to_string()),
            data: Some(BTreeMap::from([(
                CONFIG_KEY.to_string(),
                ByteString(payload),
            )])),
            ..Default::default()
        }
    }
}

/// Merge `annotations` into the secret's own: new keys are added, existing
/// keys overwritten, anything else left alone.
fn merge_annotations(secret: &mut Secret, annotations: &AnnotationMap) {
    if annotations.is_empty() {
        return;
    }
    secret
        .metadata
        .annotations
        .get_or_insert_with(BTreeMap::new)
        .extend(annotations.iter().map(|(k, v)| (k.clone(), v.clone())));
}

/// Ensure the pull secret exists in `namespace` with the current login.
///
/// An existing secret is updated in place. If that update is rejected the
/// secret is deleted and created again, once; there is no further retry.
/// The secret does not exist between that delete and the create.
#[instrument(skip(store, template), fields(secret = %template.name))]
pub async fn upsert_pull_secret<S>(
    store: &S,
    namespace: &str,
    template: &PullSecretTemplate,
) -> Result<UpsertAction>
where
    S: SecretStore + ?Sized,
{
    let write_err = |e: RenewError| RenewError::secret_write(namespace, e);

    let existing = store
        .get_secret(namespace, &template.name)
        .await
        .map_err(write_err)?;

    let payload = template.payload().map_err(write_err)?;

    let Some(mut secret) = existing else {
        debug!("Secret not found, creating it");
        store
            .create_secret(namespace, &template.new_secret(namespace, payload))
            .await
            .map_err(write_err)?;
        return Ok(UpsertAction::Created);
    };

    secret
        .data
        .get_or_insert_with(BTreeMap::new)
        .insert(CONFIG_KEY.to_string(), ByteString(payload.clone()));
    merge_annotations(&mut secret, &template.annotations);

    match store
        .replace_secret(namespace, &template.name, &secret)
        .await
    {
        Ok(_) => Ok(UpsertAction::Updated),
        Err(e) => {
            warn!("Updating secret in place failed, recreating it: {}", e);
            store
                .delete_secret(namespace, &template.name)
                .await
                .map_err(write_err)?;
            store
                .create_secret(namespace, &template.new_secret(namespace, payload))
                .await
                .map_err(write_err)?;
            Ok(UpsertAction::Recreated)
        }
    }
}

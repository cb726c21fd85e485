// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret and namespace access

use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

#[cfg(test)]
use mockall::automock;

/// Trait abstracting the cluster operations the job needs
///
/// This allows the upsert logic to be exercised against fakes while using
/// the real kube client in production.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch a secret, returning `None` when it does not exist
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>>;

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret>;

    /// Update an existing secret in place
    async fn replace_secret(&self, namespace: &str, name: &str, secret: &Secret) -> Result<Secret>;

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<()>;

    /// Names of all namespaces in the cluster
    async fn list_namespaces(&self) -> Result<Vec<String>>;
}

/// `SecretStore` backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl KubeSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn secrets(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    #[instrument(skip(self))]
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        match self.secrets(namespace).get(name).await {
            Ok(secret) => Ok(Some(secret)),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("Secret {}/{} does not exist", namespace, name);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, secret), fields(name = %secret.name_any()))]
    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        Ok(self
            .secrets(namespace)
            .create(&PostParams::default(), secret)
            .await?)
    }

    #[instrument(skip(self, secret))]
    async fn replace_secret(&self, namespace: &str, name: &str, secret: &Secret) -> Result<Secret> {
        Ok(self
            .secrets(namespace)
            .replace(name, &PostParams::default(), secret)
            .await?)
    }

    #[instrument(skip(self))]
    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<()> {
        self.secrets(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces.list(&ListParams::default()).await?;

        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }
}

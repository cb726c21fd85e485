// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::error::{RenewError, Result};
use crate::kubernetes::SecretStore;
use async_trait::async_trait;
use http::{Request, Response};
use http_body_util::BodyExt;
use k8s_openapi::api::core::v1::Secret;
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A request seen by `MockService`
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// A mock HTTP service that returns predefined responses based on method and path,
/// recording every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for requests with this method and exact path
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future =
        Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(method.clone(), path.clone()))
            .cloned();
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req
                .into_body()
                .collect()
                .await
                .map(|collected| collected.to_bytes())
                .unwrap_or_default();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.clone(),
                body: String::from_utf8_lossy(&body).to_string(),
            });

            let (status, body) =
                response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock namespace list JSON response
pub fn namespace_list_json(names: &[&str]) -> String {
    let items: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Namespace",
                "metadata": { "name": name, "uid": format!("uid-{}", name) }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NamespaceList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a mock pull secret JSON response
pub fn secret_json(namespace: &str, name: &str, annotations: &[(&str, &str)]) -> String {
    let annotations: BTreeMap<_, _> = annotations.iter().cloned().collect();
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "42",
            "annotations": annotations
        },
        "type": "kubernetes.io/dockerconfigjson",
        "data": { ".dockerconfigjson": "e30=" }
    })
    .to_string()
}

/// Create a successful delete status response
pub fn status_success_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Success"
    })
    .to_string()
}

/// Create a Status failure response
pub fn status_failure_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_failure_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Build the error the kube client reports for a failed API call
pub fn api_error(code: u16, reason: &str, message: &str) -> RenewError {
    RenewError::KubeError(kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: reason.to_string(),
        code,
    }))
}

/// In-memory `SecretStore` with per-operation failure injection.
///
/// Stored secrets carry a resource version that is bumped on every write;
/// replacing with a stale version is rejected with a conflict like the API server does.
#[derive(Default)]
pub struct InMemorySecretStore {
    namespaces: Vec<String>,
    secrets: Mutex<BTreeMap<(String, String), Secret>>,
    version: Mutex<u64>,
    calls: Mutex<Vec<String>>,
    fail_list: bool,
    fail_get: HashSet<String>,
    fail_create: HashSet<String>,
    fail_replace: HashSet<String>,
    fail_delete: HashSet<String>,
    written_after_get: HashSet<String>,
}

impl InMemorySecretStore {
    pub fn new(namespaces: &[&str]) -> Self {
        Self {
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Seed an existing secret; its namespace and name are taken from the metadata
    pub fn with_secret(self, mut secret: Secret) -> Self {
        let key = (
            secret.metadata.namespace.clone().unwrap_or_default(),
            secret.metadata.name.clone().unwrap_or_default(),
        );
        secret.metadata.resource_version = Some(self.next_version());
        self.secrets.lock().unwrap().insert(key, secret);
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_get(mut self, namespace: &str) -> Self {
        self.fail_get.insert(namespace.to_string());
        self
    }

    pub fn failing_create(mut self, namespace: &str) -> Self {
        self.fail_create.insert(namespace.to_string());
        self
    }

    pub fn failing_replace(mut self, namespace: &str) -> Self {
        self.fail_replace.insert(namespace.to_string());
        self
    }

    pub fn failing_delete(mut self, namespace: &str) -> Self {
        self.fail_delete.insert(namespace.to_string());
        self
    }

    /// Simulate another writer touching the secret right after every read,
    /// so the copy handed out carries a stale resource version
    pub fn concurrent_writer(mut self, namespace: &str) -> Self {
        self.written_after_get.insert(namespace.to_string());
        self
    }

    /// Current stored copy of a secret
    pub fn secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Operations performed so far, formatted as `<op> <namespace>/<name>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, namespace: &str, name: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}/{}", op, namespace, name));
    }

    fn next_version(&self) -> String {
        let mut version = self.version.lock().unwrap();
        *version += 1;
        version.to_string()
    }
}

fn forbidden(op: &str, namespace: &str) -> RenewError {
    api_error(
        403,
        "Forbidden",
        &format!("cannot {} secrets in namespace {}", op, namespace),
    )
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        self.record("get", namespace, name);
        if self.fail_get.contains(namespace) {
            return Err(forbidden("get", namespace));
        }
        let secret = self.secret(namespace, name);
        if secret.is_some() && self.written_after_get.contains(namespace) {
            let version = self.next_version();
            if let Some(stored) = self
                .secrets
                .lock()
                .unwrap()
                .get_mut(&(namespace.to_string(), name.to_string()))
            {
                stored.metadata.resource_version = Some(version);
            }
        }
        Ok(secret)
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        let name = secret.metadata.name.clone().unwrap_or_default();
        self.record("create", namespace, &name);
        if self.fail_create.contains(namespace) {
            return Err(forbidden("create", namespace));
        }

        let mut secrets = self.secrets.lock().unwrap();
        let key = (namespace.to_string(), name.clone());
        if secrets.contains_key(&key) {
            return Err(api_error(
                409,
                "AlreadyExists",
                &format!("secrets \"{}\" already exists", name),
            ));
        }

        let mut stored = secret.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        stored.metadata.resource_version = Some(self.next_version());
        secrets.insert(key, stored.clone());
        Ok(stored)
    }

    async fn replace_secret(&self, namespace: &str, name: &str, secret: &Secret) -> Result<Secret> {
        self.record("replace", namespace, name);
        if self.fail_replace.contains(namespace) {
            return Err(forbidden("update", namespace));
        }

        let mut secrets = self.secrets.lock().unwrap();
        let key = (namespace.to_string(), name.to_string());
        let Some(current) = secrets.get(&key) else {
            return Err(api_error(404, "NotFound", &format!("secrets \"{}\" not found", name)));
        };
        if secret.metadata.resource_version.is_some()
            && secret.metadata.resource_version != current.metadata.resource_version
        {
            return Err(api_error(
                409,
                "Conflict",
                "the object has been modified; please apply your changes to the latest version",
            ));
        }

        let mut stored = secret.clone();
        stored.metadata.resource_version = Some(self.next_version());
        secrets.insert(key, stored.clone());
        Ok(stored)
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<()> {
        self.record("delete", namespace, name);
        if self.fail_delete.contains(namespace) {
            return Err(forbidden("delete", namespace));
        }

        match self
            .secrets
            .lock()
            .unwrap()
            .remove(&(namespace.to_string(), name.to_string()))
        {
            Some(_) => Ok(()),
            None => Err(api_error(404, "NotFound", &format!("secrets \"{}\" not found", name))),
        }
    }

    async fn list_namespaces(&self) -> Result<Vec<String>> {
        if self.fail_list {
            return Err(forbidden("list", "cluster scope"));
        }
        Ok(self.namespaces.clone())
    }
}

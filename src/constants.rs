// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the job
pub mod env {
    /// Name of the pull secret to maintain (required)
    pub const SECRET_NAME: &str = "DOCKER_SECRET_NAME";
    /// Comma separated namespaces to update instead of all namespaces
    pub const TARGET_NAMESPACE: &str = "TARGET_NAMESPACE";
    /// Comma separated namespaces to skip when no target is given
    pub const EXCLUDE_NAMESPACE: &str = "EXCLUDE_NAMESPACE";
    /// Comma separated registry hosts overriding the discovered endpoint
    pub const REGISTRIES: &str = "DOCKER_REGISTRIES";
    /// JSON object of annotations to put on every secret
    pub const SECRET_ANNOTATIONS: &str = "SECRET_ANNOTATIONS";
    /// Timeout applied to every outbound API call, in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}

/// Pull secret payload layout
pub mod docker {
    /// Secret type understood by the kubelet image puller
    pub const SECRET_TYPE: &str = "kubernetes.io/dockerconfigjson";
    /// Data key holding the serialized docker config
    pub const CONFIG_KEY: &str = ".dockerconfigjson";
    /// Placeholder email written into every auth entry
    pub const DEFAULT_EMAIL: &str = "awsregrenew@demo.test";
}

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

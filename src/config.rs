// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::{RenewError, Result};
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

/// Annotations applied to every managed secret
pub type AnnotationMap = BTreeMap<String, String>;

/// Job configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Name of the pull secret created in every target namespace
    pub secret_name: String,
    pub target_namespace: Option<String>,
    pub exclude_namespace: Option<String>,
    /// Raw registry override list, comma separated
    pub registries: Option<String>,
    /// Raw annotation JSON, parsed later by `parse_annotations`
    pub annotations: Option<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let secret_name = get(vars::SECRET_NAME).ok_or_else(|| {
            RenewError::ConfigError(format!(
                "Environment variable {} is required",
                vars::SECRET_NAME
            ))
        })?;

        let request_timeout = match get(vars::REQUEST_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(RenewError::ConfigError(format!(
                        "{} must be a positive number of seconds, got '{}'",
                        vars::REQUEST_TIMEOUT_SECS,
                        raw
                    )))
                }
            },
        };

        let target_namespace = get(vars::TARGET_NAMESPACE);
        if target_namespace
            .as_deref()
            .is_some_and(|raw| split_namespaces(raw).is_empty())
        {
            return Err(RenewError::ConfigError(format!(
                "{} is set but names no namespace",
                vars::TARGET_NAMESPACE
            )));
        }

        Ok(Config {
            secret_name,
            target_namespace,
            exclude_namespace: get(vars::EXCLUDE_NAMESPACE),
            registries: get(vars::REGISTRIES),
            annotations: get(vars::SECRET_ANNOTATIONS),
            request_timeout,
        })
    }
}

/// Parse the operator supplied annotation JSON. Unset or `null` yields an empty map.
pub fn parse_annotations(raw: Option<&str>) -> Result<AnnotationMap> {
    match raw {
        None | Some("") => Ok(AnnotationMap::new()),
        Some(json) => serde_json::from_str::<Option<AnnotationMap>>(json)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                RenewError::ConfigError(format!("failed to parse secret annotations: {}", e))
            }),
    }
}

/// Registry hosts the pull secret must authenticate against.
///
/// Without an override this is the single server reported by the credential
/// source; an override is split on commas as-is, keeping order and count.
pub fn resolve_server_list(default_server: &str, registries: Option<&str>) -> Vec<String> {
    match registries {
        None | Some("") => vec![default_server.to_string()],
        Some(list) => list.split(',').map(str::to_string).collect(),
    }
}

/// Split a comma separated namespace list, trimming and dropping empty entries.
pub fn split_namespaces(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

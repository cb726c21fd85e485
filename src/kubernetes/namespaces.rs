// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target namespace selection

use crate::config::split_namespaces;
use crate::error::{RenewError, Result};
use crate::kubernetes::SecretStore;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Resolve the namespaces the pull secret is written to.
///
/// An explicit target list is used verbatim without querying the cluster.
/// Otherwise every namespace is listed and the excluded ones are removed.
#[instrument(skip(store))]
pub async fn resolve_namespaces<S>(
    store: &S,
    target: Option<&str>,
    exclude: Option<&str>,
) -> Result<Vec<String>>
where
    S: SecretStore + ?Sized,
{
    if let Some(target) = target {
        debug!("Using explicit target namespaces");
        return Ok(split_namespaces(target));
    }

    let excluded: HashSet<String> = exclude
        .map(split_namespaces)
        .unwrap_or_default()
        .into_iter()
        .collect();

    let namespaces = store
        .list_namespaces()
        .await
        .map_err(|e| RenewError::NamespaceListError(e.to_string()))?;

    Ok(namespaces
        .into_iter()
        .filter(|ns| !excluded.contains(ns))
        .collect())
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The `.dockerconfigjson` payload stored in pull secrets

use crate::constants::docker::DEFAULT_EMAIL;
use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry credentials file, keyed by registry host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerConfig {
    pub auths: BTreeMap<String, DockerAuth>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerAuth {
    pub username: String,
    pub password: String,
    pub email: String,
    /// base64 of `username:password`
    pub auth: String,
}

impl DockerConfig {
    /// One auth entry per server, all sharing the same login
    pub fn new(username: &str, password: &str, servers: &[String]) -> Self {
        let auth = STANDARD.encode(format!("{}:{}", username, password));

        let auths = servers
            .iter()
            .map(|server| {
                (
                    server.clone(),
                    DockerAuth {
                        username: username.to_string(),
                        password: password.to_string(),
                        email: DEFAULT_EMAIL.to_string(),
                        auth: auth.clone(),
                    },
                )
            })
            .collect();

        Self { auths }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Amazon ECR login tokens

use super::{CredentialSource, RegistryCredential};
use crate::error::{RenewError, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ecr::error::DisplayErrorContext;
use aws_sdk_ecr::Client;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::time::Duration;
use tracing::{debug, instrument};

/// Load the ambient AWS configuration with an explicit per-operation timeout.
pub async fn load_sdk_config(timeout: Duration) -> SdkConfig {
    let timeouts = aws_config::timeout::TimeoutConfig::builder()
        .operation_timeout(timeout)
        .build();

    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .timeout_config(timeouts)
        .load()
        .await
}

/// Fetches a docker login for the account's private registry
pub struct EcrCredentialSource {
    client: Client,
}

impl EcrCredentialSource {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CredentialSource for EcrCredentialSource {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<RegistryCredential> {
        let output = self
            .client
            .get_authorization_token()
            .send()
            .await
            .map_err(|e| RenewError::CredentialFetchError(DisplayErrorContext(&e).to_string()))?;

        let Some(data) = output.authorization_data().first() else {
            return Err(RenewError::CredentialFetchError(
                "response contained no authorization data".to_string(),
            ));
        };

        if let Some(expires_at) = data.expires_at() {
            debug!("Authorization token expires at {:?}", expires_at);
        }

        let token = data.authorization_token().ok_or_else(|| {
            RenewError::CredentialFetchError("authorization data has no token".to_string())
        })?;
        let endpoint = data.proxy_endpoint().ok_or_else(|| {
            RenewError::CredentialFetchError("authorization data has no proxy endpoint".to_string())
        })?;

        decode_authorization_token(token, endpoint)
    }
}

/// Turn an ECR authorization token (base64 of `user:password`) into a credential.
pub fn decode_authorization_token(token: &str, endpoint: &str) -> Result<RegistryCredential> {
    let decoded = STANDARD
        .decode(token.trim())
        .map_err(|e| RenewError::CredentialFetchError(format!("invalid token encoding: {}", e)))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|e| RenewError::CredentialFetchError(format!("token is not UTF-8: {}", e)))?;

    let Some((username, password)) = decoded.split_once(':') else {
        return Err(RenewError::CredentialFetchError(
            "token is not of the form user:password".to_string(),
        ));
    };

    Ok(RegistryCredential {
        username: username.to_string(),
        password: password.to_string(),
        server: endpoint.to_string(),
    })
}

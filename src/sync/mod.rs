// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Writing the registry login into namespaces.

pub mod docker_config;
pub mod runner;
pub mod upsert;

pub use runner::{run, summarize, NamespaceOutcome, RunReport};
pub use upsert::{upsert_pull_secret, PullSecretTemplate, UpsertAction};

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for servconf
//!
//! Cluster clients here point at a local address and never send a request;
//! building one only needs a Tokio runtime to be entered.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::runtime::Runtime;
use uuid::Uuid;

use servconf::ClusterClient;

pub const CLUSTER_URL: &str = "http://127.0.0.1:6443";

/// Runtime for tests that build clients outside `#[tokio::test]`
pub static RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("Failed to start test runtime"));

/// Kubeconfig with two contexts on the same cluster
pub const KUBECONFIG_YAML: &str = r#"apiVersion: v1
kind: Config
clusters:
- name: local
  cluster:
    server: http://127.0.0.1:6443
contexts:
- name: servers
  context:
    cluster: local
    user: tester
    namespace: servers
- name: staging
  context:
    cluster: local
    user: tester
    namespace: staging
current-context: servers
users:
- name: tester
  user:
    token: fixture-token
"#;

/// Build a client that is never contacted
pub fn test_cluster() -> ClusterClient {
    let uri = CLUSTER_URL.parse().expect("Invalid fixture URL");
    ClusterClient::from_config(kube::Config::new(uri)).expect("Failed to build test client")
}

/// Write the fixture kubeconfig to a unique temp file
pub fn write_kubeconfig() -> PathBuf {
    let path = std::env::temp_dir().join(format!("servconf-kubeconfig-{}.yaml", Uuid::now_v7()));
    std::fs::write(&path, KUBECONFIG_YAML).expect("Failed to write fixture kubeconfig");
    path
}

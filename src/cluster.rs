// Copyright (c) 2025 - Cowboy AI, Inc.
//! Kubernetes cluster client bootstrap
//!
//! The client is built once, from a kubeconfig file, and handed to every
//! [`ServerConfiguration`](crate::ServerConfiguration) that needs it.
//! Processes that want a single shared client can use
//! [`ClusterClient::shared`], which initializes it exactly once even when
//! several tasks race on first use.

use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Errors raised while locating credentials or building the client
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("Cannot locate kubeconfig: no home directory and no explicit path")]
    NoHomeDirectory,

    #[error("Failed to load kubeconfig from {}: {source}", .path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("Failed to build cluster client: {0}")]
    Client(#[from] kube::Error),
}

/// Where to find cluster credentials
#[derive(Debug, Clone, Default)]
pub struct ClusterConfig {
    /// Explicit kubeconfig path; `~/.kube/config` when unset
    pub kubeconfig: Option<PathBuf>,
    /// Context to select; the file's current context when unset
    pub context: Option<String>,
}

impl ClusterConfig {
    /// Use an explicit kubeconfig file
    pub fn with_kubeconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }

    /// Select a named context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Path of the kubeconfig file to read
    pub fn resolve_kubeconfig_path(&self) -> Result<PathBuf, ClusterError> {
        if let Some(path) = &self.kubeconfig {
            return Ok(path.clone());
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".kube").join("config"))
            .ok_or(ClusterError::NoHomeDirectory)
    }
}

static SHARED_CLIENT: OnceCell<ClusterClient> = OnceCell::const_new();

/// Handle to the Kubernetes API
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ClusterClient {
    client: kube::Client,
}

impl ClusterClient {
    /// Load credentials from a kubeconfig file and build a client
    pub async fn from_kubeconfig(config: &ClusterConfig) -> Result<Self, ClusterError> {
        let path = config.resolve_kubeconfig_path()?;
        debug!("Reading kubeconfig from {}", path.display());

        let kubeconfig = Kubeconfig::read_from(&path).map_err(|source| ClusterError::Kubeconfig {
            path: path.clone(),
            source,
        })?;

        let options = KubeConfigOptions {
            context: config.context.clone(),
            ..KubeConfigOptions::default()
        };

        let client_config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .map_err(|source| ClusterError::Kubeconfig { path, source })?;

        Self::from_config(client_config)
    }

    /// Build a client from an already resolved configuration
    ///
    /// No request is sent; the connection is opened on first use.
    pub fn from_config(config: kube::Config) -> Result<Self, ClusterError> {
        let cluster_url = config.cluster_url.clone();
        let client = kube::Client::try_from(config)?;

        info!("Cluster client ready for {}", cluster_url);
        Ok(Self { client })
    }

    /// Process-wide client, built on first call
    ///
    /// Concurrent first callers wait on one initialization. If it fails the
    /// error is returned and the next call tries again. Later calls ignore
    /// `config` and return the client already built.
    pub async fn shared(config: &ClusterConfig) -> Result<&'static ClusterClient, ClusterError> {
        SHARED_CLIENT
            .get_or_try_init(|| Self::from_kubeconfig(config))
            .await
    }

    /// Namespace requests default to
    pub fn default_namespace(&self) -> &str {
        self.client.default_namespace()
    }

    /// Get the underlying kube client for API calls
    pub fn inner(&self) -> &kube::Client {
        &self.client
    }
}

impl fmt::Debug for ClusterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterClient")
            .field("default_namespace", &self.default_namespace())
            .finish_non_exhaustive()
    }
}

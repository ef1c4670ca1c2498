// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server request CLI
//!
//! Builds a validated server configuration from flags, binds it to the
//! cluster found in the kubeconfig, and prints its public view as JSON.
//!
//! Run with: cargo run --bin servconf -- --username alice --server-name web-01 --ram 4
//!
//! Logs go to stderr; set RUST_LOG to adjust verbosity.

use anyhow::{bail, Context, Result};
use clap::Parser;
use servconf::{ClusterClient, ClusterConfig, Protocol, ServerConfiguration};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{info, warn};

/// Validate a server request and print its public view
#[derive(Debug, Parser)]
#[command(name = "servconf", version, about)]
struct Args {
    /// Path to the kubeconfig file (default: ~/.kube/config)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (default: current context)
    #[arg(long)]
    context: Option<String>,

    /// Name of the user requesting the server
    #[arg(long)]
    username: String,

    /// Name of the new server
    #[arg(long)]
    server_name: String,

    /// Kind of server requested
    #[arg(long)]
    server_type: Option<String>,

    /// CPU cores, e.g. 2 or 500m
    #[arg(long)]
    cpu: Option<String>,

    /// RAM in GiB
    #[arg(long)]
    ram: Option<String>,

    /// Disk space in GiB
    #[arg(long)]
    disk: Option<String>,

    /// Address clients connect to
    #[arg(long)]
    ip: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    internal_port: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    external_port: Option<i32>,

    /// TCP, UDP or SCTP
    #[arg(long)]
    protocol: Option<Protocol>,

    /// Fail on any rejected value instead of logging it
    #[arg(long)]
    strict: bool,
}

/// Log a rejected value, or fail when running strict
fn check<E: Display>(strict: bool, field: &str, result: Result<(), E>) -> Result<()> {
    if let Err(e) = result {
        if strict {
            bail!("Invalid {}: {}", field, e);
        }
        warn!("Ignoring {}: {}", field, e);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cluster_config = ClusterConfig {
        kubeconfig: args.kubeconfig.clone(),
        context: args.context.clone(),
    };

    // Without a client the request cannot be provisioned, so this is fatal
    let cluster = ClusterClient::from_kubeconfig(&cluster_config)
        .await
        .context("Failed to bootstrap cluster client")?;
    info!("✅ Cluster client ready (namespace: {})", cluster.default_namespace());

    let mut config = if args.strict {
        ServerConfiguration::try_new(cluster, &args.username, &args.server_name)?
    } else {
        ServerConfiguration::new(cluster, &args.username, &args.server_name)
    };

    if let Some(server_type) = &args.server_type {
        check(args.strict, "server type", config.set_server_type(server_type))?;
    }
    if let Some(cpu) = &args.cpu {
        check(args.strict, "cpu", config.set_cpu(cpu))?;
    }
    if let Some(ram) = &args.ram {
        check(args.strict, "ram", config.set_ram(ram))?;
    }
    if let Some(disk) = &args.disk {
        check(args.strict, "disk", config.set_disk(disk))?;
    }
    if let Some(ip) = args.ip {
        config.set_ip(ip);
    }
    if let Some(port) = args.internal_port {
        config.set_internal_port(port);
    }
    if let Some(port) = args.external_port {
        config.set_external_port(port);
    }
    if let Some(protocol) = args.protocol {
        config.set_protocol(protocol);
    }

    if args.strict {
        config.validate().context("Server request is incomplete")?;
    } else if let Err(e) = config.validate() {
        warn!("Server request not ready for provisioning: {}", e);
    }

    let view = config.to_public_view();
    println!(
        "{}",
        serde_json::to_string_pretty(&view).context("Failed to serialize public view")?
    );

    Ok(())
}

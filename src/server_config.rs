// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server Request Configuration
//!
//! [`ServerConfiguration`] collects the parameters of one requested server,
//! validating each field as it is set. [`PublicView`] is its read-only
//! projection for web handlers and other presentation layers.

use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::cluster::ClusterClient;
use crate::domain::{
    validate_identifier, validate_port, Identifier, IdentifierError, IdentifierField, PortKind,
    Protocol, Quantity, QuantityError,
};
use crate::errors::{ServconfError, ServconfResult};

/// Unit appended to caller-supplied RAM and disk magnitudes
const GIBIBYTE_SUFFIX: &str = "Gi";

/// Parameters of one server request, bound to a cluster client
///
/// # Invariants
/// - Identifier fields are empty or valid lowercase DNS labels
/// - A rejected value never replaces a stored one
/// - RAM and disk are always binary quantities (magnitudes in GiB)
#[derive(Debug, Clone)]
pub struct ServerConfiguration {
    username: Option<Identifier>,
    server_name: Option<Identifier>,
    server_type: Option<Identifier>,
    cpu: Quantity,
    ram: Quantity,
    disk: Quantity,
    ip: String,
    internal_port: i32,
    external_port: i32,
    protocol: Option<Protocol>,
    cluster: ClusterClient,
}

impl ServerConfiguration {
    /// Create a configuration for `username` and `server_name`
    ///
    /// Invalid identifiers are logged and leave the field empty; use
    /// [`ServerConfiguration::try_new`] to get the error instead.
    pub fn new(
        cluster: ClusterClient,
        username: impl AsRef<str>,
        server_name: impl AsRef<str>,
    ) -> Self {
        let mut config = Self::empty(cluster);

        if let Err(e) = config.set_username(username) {
            warn!("Ignoring username: {}", e);
        }
        if let Err(e) = config.set_server_name(server_name) {
            warn!("Ignoring server name: {}", e);
        }

        config
    }

    /// Create a configuration, failing on the first invalid identifier
    pub fn try_new(
        cluster: ClusterClient,
        username: impl AsRef<str>,
        server_name: impl AsRef<str>,
    ) -> ServconfResult<Self> {
        let mut config = Self::empty(cluster);
        config.set_username(username)?;
        config.set_server_name(server_name)?;
        Ok(config)
    }

    fn empty(cluster: ClusterClient) -> Self {
        Self {
            username: None,
            server_name: None,
            server_type: None,
            cpu: Quantity::default(),
            ram: Quantity::default(),
            disk: Quantity::default(),
            ip: String::new(),
            internal_port: 0,
            external_port: 0,
            protocol: None,
            cluster,
        }
    }

    fn set_identifier(
        slot: &mut Option<Identifier>,
        field: IdentifierField,
        value: &str,
    ) -> Result<(), IdentifierError> {
        let identifier = validate_identifier(field, value)?;
        debug!("Set {} to {}", field, identifier);
        *slot = Some(identifier);
        Ok(())
    }

    fn set_quantity(slot: &mut Quantity, name: &str, value: &str) -> Result<(), QuantityError> {
        let quantity = Quantity::parse(value)?;
        debug!("Set {} to {}", name, quantity);
        *slot = quantity;
        Ok(())
    }

    /// Name of the user requesting the server, or `""` if unset
    pub fn username(&self) -> &str {
        self.username.as_ref().map_or("", Identifier::as_str)
    }

    /// Set the requesting user's name
    pub fn set_username(&mut self, username: impl AsRef<str>) -> Result<(), IdentifierError> {
        Self::set_identifier(&mut self.username, IdentifierField::Username, username.as_ref())
    }

    /// Name of the new server, or `""` if unset
    pub fn server_name(&self) -> &str {
        self.server_name.as_ref().map_or("", Identifier::as_str)
    }

    /// Set the new server's name
    pub fn set_server_name(&mut self, server_name: impl AsRef<str>) -> Result<(), IdentifierError> {
        Self::set_identifier(
            &mut self.server_name,
            IdentifierField::ServerName,
            server_name.as_ref(),
        )
    }

    /// Kind of server requested, or `""` if unset
    pub fn server_type(&self) -> &str {
        self.server_type.as_ref().map_or("", Identifier::as_str)
    }

    /// Set the kind of server requested
    pub fn set_server_type(&mut self, server_type: impl AsRef<str>) -> Result<(), IdentifierError> {
        Self::set_identifier(
            &mut self.server_type,
            IdentifierField::ServerType,
            server_type.as_ref(),
        )
    }

    /// CPU cores to assign
    pub fn cpu(&self) -> &Quantity {
        &self.cpu
    }

    /// Set CPU cores from a quantity string such as `2` or `500m`
    pub fn set_cpu(&mut self, cpu: impl AsRef<str>) -> Result<(), QuantityError> {
        Self::set_quantity(&mut self.cpu, "cpu", cpu.as_ref())
    }

    /// RAM to reserve
    pub fn ram(&self) -> &Quantity {
        &self.ram
    }

    /// Set RAM from a magnitude in GiB, such as `4` or `0.5`
    pub fn set_ram(&mut self, ram: impl AsRef<str>) -> Result<(), QuantityError> {
        let value = format!("{}{GIBIBYTE_SUFFIX}", ram.as_ref());
        Self::set_quantity(&mut self.ram, "ram", &value)
    }

    /// Disk space to reserve
    pub fn disk(&self) -> &Quantity {
        &self.disk
    }

    /// Set disk space from a magnitude in GiB, such as `10`
    pub fn set_disk(&mut self, disk: impl AsRef<str>) -> Result<(), QuantityError> {
        let value = format!("{}{GIBIBYTE_SUFFIX}", disk.as_ref());
        Self::set_quantity(&mut self.disk, "disk", &value)
    }

    /// Address clients connect to
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Set the address clients connect to; not validated
    pub fn set_ip(&mut self, ip: impl Into<String>) {
        self.ip = ip.into();
    }

    /// Port the server listens on inside the cluster
    pub fn internal_port(&self) -> i32 {
        self.internal_port
    }

    /// Set the internal port; range is checked by [`Self::validate`]
    pub fn set_internal_port(&mut self, port: i32) {
        self.internal_port = port;
    }

    /// Port exposed to clients
    pub fn external_port(&self) -> i32 {
        self.external_port
    }

    /// Set the external port; range is checked by [`Self::validate`]
    pub fn set_external_port(&mut self, port: i32) {
        self.external_port = port;
    }

    /// Transport protocol, if chosen
    pub fn protocol(&self) -> Option<Protocol> {
        self.protocol
    }

    /// Set the transport protocol; not validated
    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = Some(protocol);
    }

    /// Cluster client this request will be provisioned through
    pub fn cluster(&self) -> &ClusterClient {
        &self.cluster
    }

    /// Check that the request is complete enough to provision
    ///
    /// # Rules
    /// - Username, server name and server type are set
    /// - Both ports are within 1-65535
    /// - A protocol is chosen
    pub fn validate(&self) -> ServconfResult<()> {
        if self.username.is_none() {
            return Err(ServconfError::MissingField("username"));
        }
        if self.server_name.is_none() {
            return Err(ServconfError::MissingField("server_name"));
        }
        if self.server_type.is_none() {
            return Err(ServconfError::MissingField("server_type"));
        }

        validate_port(PortKind::Internal, self.internal_port)?;
        validate_port(PortKind::External, self.external_port)?;

        if self.protocol.is_none() {
            return Err(ServconfError::MissingField("protocol"));
        }

        Ok(())
    }

    /// Resource requests for the server's pod, omitting unset quantities
    pub fn resource_requests(&self) -> BTreeMap<String, K8sQuantity> {
        [
            ("cpu", &self.cpu),
            ("memory", &self.ram),
            ("ephemeral-storage", &self.disk),
        ]
        .into_iter()
        .filter(|(_, quantity)| !quantity.is_zero())
        .map(|(name, quantity)| (name.to_string(), quantity.to_k8s()))
        .collect()
    }

    /// Service port mapping the external port to the internal one
    ///
    /// `None` until a protocol is chosen.
    pub fn service_port(&self) -> Option<ServicePort> {
        let protocol = self.protocol?;

        Some(ServicePort {
            name: self.server_name.as_ref().map(ToString::to_string),
            port: self.external_port,
            target_port: Some(IntOrString::Int(self.internal_port)),
            protocol: Some(protocol.to_string()),
            ..ServicePort::default()
        })
    }

    /// Read-only snapshot for presentation layers
    pub fn to_public_view(&self) -> PublicView {
        PublicView {
            username: self.username().to_string(),
            server_name: self.server_name().to_string(),
            server_type: self.server_type().to_string(),
            cpu: self.cpu.to_canonical_string(),
            ram: self.ram.to_canonical_string(),
            disk: self.disk.to_canonical_string(),
            ip: self.ip.clone(),
            internal_port: self.internal_port,
            external_port: self.external_port,
        }
    }
}

/// Display-formatted projection of a [`ServerConfiguration`]
///
/// Quantities are rendered in canonical form (`1536Mi`, `500m`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "ServerName")]
    pub server_name: String,
    #[serde(rename = "ServerType")]
    pub server_type: String,
    #[serde(rename = "CPU")]
    pub cpu: String,
    #[serde(rename = "RAM")]
    pub ram: String,
    #[serde(rename = "Disk")]
    pub disk: String,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "InternalPort")]
    pub internal_port: i32,
    #[serde(rename = "ExternalPort")]
    pub external_port: i32,
}

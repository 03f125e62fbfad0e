//! Container creation and host configuration

use crate::error::{require, ApiError, Result};
use crate::set::KeySet;
use crate::shape::{Shape, ShapeKind};
use crate::time::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Transport protocols accepted in a port spec
pub const PORT_PROTOCOLS: [&str; 3] = ["tcp", "udp", "sctp"];

/// Check a `<port>[/<proto>]` spec such as `80/tcp`
pub fn validate_port_spec(shape: &'static str, field: &'static str, spec: &str) -> Result<()> {
    let (port, proto) = spec.split_once('/').unwrap_or((spec, "tcp"));
    if parse_port_range(port).is_none() {
        return Err(ApiError::validation(
            shape,
            field,
            format!("has invalid port in '{}'", spec),
        ));
    }
    if !PORT_PROTOCOLS.contains(&proto) {
        return Err(ApiError::validation(
            shape,
            field,
            format!("has unknown protocol in '{}'", spec),
        ));
    }
    Ok(())
}

/// Parse `8080` or `8000-8010` into an inclusive range
fn parse_port_range(raw: &str) -> Option<(u16, u16)> {
    match raw.split_once('-') {
        Some((start, end)) => {
            let start: u16 = start.parse().ok()?;
            let end: u16 = end.parse().ok()?;
            (start <= end).then_some((start, end))
        }
        None => raw.parse().ok().map(|port| (port, port)),
    }
}

/// Desired configuration for creating a container
///
/// Resource limits are optional: `None` leaves the daemon default in place,
/// while `Some(0)` sends an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domainname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    /// Memory limit in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    /// Total memory plus swap in bytes, -1 for unlimited swap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_swap: Option<i64>,
    /// Relative CPU weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_shares: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cpuset: String,
    pub attach_stdin: bool,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub port_specs: Vec<String>,
    #[serde(skip_serializing_if = "KeySet::is_empty")]
    pub exposed_ports: KeySet,
    pub tty: bool,
    pub open_stdin: bool,
    pub stdin_once: bool,
    /// `KEY=value` entries, in order
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// `None` inherits the image's command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Vec<String>>,
    pub image: String,
    #[serde(skip_serializing_if = "KeySet::is_empty")]
    pub volumes: KeySet,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub working_dir: String,
    /// `None` inherits the image's entrypoint, an empty list resets it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    pub network_disabled: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub on_build: Vec<String>,
    /// Only read by the daemon on create. Inspect responses never carry it here;
    /// see [`ContainerInfo::host_config`](super::ContainerInfo::host_config).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_config: Option<HostConfig>,
}

impl ContainerConfig {
    /// Create a configuration for the given image reference
    pub fn new(image: &str) -> Self {
        Self {
            image: image.to_string(),
            ..Self::default()
        }
    }

    /// Set command to run
    pub fn cmd<I, S>(mut self, cmd: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmd = Some(cmd.into_iter().map(Into::into).collect());
        self
    }

    /// Set entrypoint
    pub fn entrypoint<I, S>(mut self, entrypoint: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entrypoint = Some(entrypoint.into_iter().map(Into::into).collect());
        self
    }

    /// Append an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push(format!("{}={}", key, value));
        self
    }

    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    pub fn working_dir(mut self, dir: &str) -> Self {
        self.working_dir = dir.to_string();
        self
    }

    /// Expose a container port, e.g. `80/tcp`
    pub fn expose(mut self, port_spec: &str) -> Self {
        self.exposed_ports.insert(port_spec);
        self
    }

    /// Declare an anonymous volume at a container path
    pub fn volume(mut self, path: &str) -> Self {
        self.volumes.insert(path);
        self
    }

    /// Attach the host configuration sent with a create request
    pub fn host_config(mut self, host_config: HostConfig) -> Self {
        self.host_config = Some(host_config);
        self
    }

    /// Split `Env` into key/value pairs; later entries win
    pub fn env_map(&self) -> BTreeMap<&str, &str> {
        self.env
            .iter()
            .map(|entry| entry.split_once('=').unwrap_or((entry.as_str(), "")))
            .collect()
    }
}

impl Shape for ContainerConfig {
    const KIND: ShapeKind = ShapeKind::ContainerConfig;

    fn validate(&self) -> Result<()> {
        let shape = Self::KIND.wire_name();
        require(shape, "Image", &self.image)?;
        for spec in &self.exposed_ports {
            validate_port_spec(shape, "ExposedPorts", spec)?;
        }
        if let Some(host_config) = &self.host_config {
            host_config.validate()?;
        }
        Ok(())
    }
}

/// Runtime and host-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostConfig {
    /// `host:container[:mode]` bind mounts, in order
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<String>,
    #[serde(rename = "ContainerIDFile", skip_serializing_if = "String::is_empty")]
    pub container_id_file: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub lxc_conf: Vec<BTreeMap<String, String>>,
    pub privileged: bool,
    /// Container port spec to host bindings; several bindings allow IPv4/IPv6 dual-bind
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "BTreeMap::is_empty")]
    pub port_bindings: BTreeMap<String, Vec<PortBinding>>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    pub publish_all_ports: bool,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub dns_search: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub volumes_from: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_mode: String,
    pub restart_policy: RestartPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_swap: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_shares: Option<i64>,
    /// CFS period in microseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_period: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cpuset_cpus: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cpuset_mems: String,
    #[serde(skip_serializing_if = "LogConfig::is_empty")]
    pub log_config: LogConfig,
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `host:container[:mode]` bind mount
    pub fn bind(mut self, bind: &str) -> Self {
        self.binds.push(bind.to_string());
        self
    }

    /// Publish a container port on the host; repeatable per port
    pub fn publish(mut self, port_spec: &str, binding: PortBinding) -> Self {
        self.port_bindings
            .entry(port_spec.to_string())
            .or_default()
            .push(binding);
        self
    }

    pub fn restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = policy;
        self
    }

    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn network_mode(mut self, mode: &str) -> Self {
        self.network_mode = mode.to_string();
        self
    }
}

impl Shape for HostConfig {
    const KIND: ShapeKind = ShapeKind::HostConfig;

    fn validate(&self) -> Result<()> {
        let shape = Self::KIND.wire_name();
        for bind in &self.binds {
            let parts: Vec<&str> = bind.split(':').collect();
            if !(2..=3).contains(&parts.len()) || parts[..2].iter().any(|p| p.is_empty()) {
                return Err(ApiError::validation(
                    shape,
                    "Binds",
                    format!("entry '{}' is not host:container[:mode]", bind),
                ));
            }
        }
        for (spec, bindings) in &self.port_bindings {
            validate_port_spec(shape, "PortBindings", spec)?;
            for binding in bindings {
                binding.validate()?;
            }
        }
        self.restart_policy.validate()?;
        self.log_config.validate()
    }
}

/// Log driver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogConfig {
    /// Driver name, e.g. `json-file` or `syslog`
    #[serde(rename = "Type")]
    pub log_type: String,
    /// Driver options; valid keys depend on the driver
    #[serde(deserialize_with = "null_as_default")]
    pub config: BTreeMap<String, String>,
}

impl LogConfig {
    pub fn new(log_type: &str) -> Self {
        Self {
            log_type: log_type.to_string(),
            config: BTreeMap::new(),
        }
    }

    /// Set a driver option
    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.log_type.is_empty() && self.config.is_empty()
    }
}

impl Shape for LogConfig {
    const KIND: ShapeKind = ShapeKind::LogConfig;

    fn validate(&self) -> Result<()> {
        if !self.config.is_empty() && self.log_type.is_empty() {
            return Err(ApiError::validation(
                Self::KIND.wire_name(),
                "Type",
                "is required when Config is set",
            ));
        }
        Ok(())
    }
}

/// Container restart behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RestartPolicy {
    pub name: String,
    /// Only meaningful for `on-failure`
    pub maximum_retry_count: i64,
}

impl RestartPolicy {
    pub const NO: &'static str = "no";
    pub const ALWAYS: &'static str = "always";
    pub const UNLESS_STOPPED: &'static str = "unless-stopped";
    pub const ON_FAILURE: &'static str = "on-failure";

    /// Accepted policy names; the empty name leaves the daemon default
    pub const NAMES: [&'static str; 5] = [
        "",
        Self::NO,
        Self::ALWAYS,
        Self::UNLESS_STOPPED,
        Self::ON_FAILURE,
    ];

    pub fn no() -> Self {
        Self::named(Self::NO)
    }

    pub fn always() -> Self {
        Self::named(Self::ALWAYS)
    }

    pub fn unless_stopped() -> Self {
        Self::named(Self::UNLESS_STOPPED)
    }

    /// Restart on non-zero exit, at most `max_retries` times (0 = unbounded)
    pub fn on_failure(max_retries: i64) -> Self {
        Self {
            name: Self::ON_FAILURE.to_string(),
            maximum_retry_count: max_retries,
        }
    }

    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            maximum_retry_count: 0,
        }
    }

    /// Whether the policy bounds restarts by a retry count
    pub fn is_retry_bounded(&self) -> bool {
        self.name == Self::ON_FAILURE
    }

    /// Retry limit, if the policy is bounded and a limit was set
    pub fn retry_limit(&self) -> Option<u64> {
        if self.is_retry_bounded() && self.maximum_retry_count > 0 {
            Some(self.maximum_retry_count as u64)
        } else {
            None
        }
    }
}

impl Shape for RestartPolicy {
    const KIND: ShapeKind = ShapeKind::RestartPolicy;

    fn validate(&self) -> Result<()> {
        let shape = Self::KIND.wire_name();
        if !Self::NAMES.contains(&self.name.as_str()) {
            return Err(ApiError::validation(
                shape,
                "Name",
                format!("'{}' is not one of no, always, unless-stopped, on-failure", self.name),
            ));
        }
        if self.maximum_retry_count < 0 {
            return Err(ApiError::validation(shape, "MaximumRetryCount", "must not be negative"));
        }
        if self.maximum_retry_count > 0 && !self.is_retry_bounded() {
            return Err(ApiError::validation(
                shape,
                "MaximumRetryCount",
                format!("cannot be used with restart policy '{}'", self.name),
            ));
        }
        Ok(())
    }
}

/// One host-side binding for a container port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PortBinding {
    /// Empty binds every interface
    pub host_ip: String,
    /// Empty lets the daemon pick a free port
    pub host_port: String,
}

impl PortBinding {
    pub fn new(host_ip: &str, host_port: &str) -> Self {
        Self {
            host_ip: host_ip.to_string(),
            host_port: host_port.to_string(),
        }
    }

    /// Bind on every interface
    pub fn any_ip(host_port: &str) -> Self {
        Self::new("", host_port)
    }
}

impl Shape for PortBinding {
    const KIND: ShapeKind = ShapeKind::PortBinding;

    fn validate(&self) -> Result<()> {
        let shape = Self::KIND.wire_name();
        if !self.host_ip.is_empty() && self.host_ip.parse::<IpAddr>().is_err() {
            return Err(ApiError::validation(
                shape,
                "HostIp",
                format!("'{}' is not an IP address", self.host_ip),
            ));
        }
        if !self.host_port.is_empty() && parse_port_range(&self.host_port).is_none() {
            return Err(ApiError::validation(
                shape,
                "HostPort",
                format!("'{}' is not a port or port range", self.host_port),
            ));
        }
        Ok(())
    }
}

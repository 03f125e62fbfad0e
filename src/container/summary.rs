//! Container list rows and the create response

use crate::error::{require, Result};
use crate::shape::{Shape, ShapeKind};
use crate::time::{from_epoch, null_as_default};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port of a listed container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Port {
    /// Host address, absent for unpublished ports
    #[serde(rename = "IP", skip_serializing_if = "String::is_empty")]
    pub ip: String,
    pub private_port: u16,
    /// Zero when the port is not published on the host
    pub public_port: u16,
    /// `tcp` or `udp`
    #[serde(rename = "Type")]
    pub port_type: String,
}

impl Port {
    pub fn is_published(&self) -> bool {
        self.public_port != 0
    }
}

impl Shape for Port {
    const KIND: ShapeKind = ShapeKind::Port;
}

/// Summary row returned when listing containers
///
/// Lighter than [`ContainerInfo`](super::ContainerInfo); the two are not interchangeable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Container {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub names: Vec<String>,
    pub image: String,
    pub command: String,
    /// Creation time in epoch seconds
    pub created: i64,
    /// Human-readable status, e.g. `Up 2 hours`
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<Port>,
    /// Bytes changed in the container's writable layer
    pub size_rw: i64,
    /// Total bytes of the container's root filesystem
    pub size_root_fs: i64,
}

impl Container {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_epoch(self.created)
    }

    /// First name without the daemon's leading slash
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(|name| name.trim_start_matches('/'))
    }
}

impl Shape for Container {
    const KIND: ShapeKind = ShapeKind::Container;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Id", &self.id)
    }
}

/// Response to a container create request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RespContainersCreate {
    pub id: String,
    /// Always present; `null` decodes as empty
    #[serde(deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
}

impl Shape for RespContainersCreate {
    const KIND: ShapeKind = ShapeKind::RespContainersCreate;

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Id", &self.id)
    }
}

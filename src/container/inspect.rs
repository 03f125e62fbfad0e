//! Container inspection result

use super::config::{ContainerConfig, HostConfig, PortBinding};
use crate::error::{require, ApiError, Result};
use crate::shape::{Shape, ShapeKind};
use crate::time::{null_as_default, zero_time};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Container status as observed through [`State`] flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    /// Created but never started
    Created,
    /// Container is running
    Running,
    /// Container is paused
    Paused,
    /// Restart policy is bringing the container back up
    Restarting,
    /// Container has exited
    Exited,
    /// Marked running, but the daemon lost track of the process
    Ghost,
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerStatus::Created => write!(f, "created"),
            ContainerStatus::Running => write!(f, "running"),
            ContainerStatus::Paused => write!(f, "paused"),
            ContainerStatus::Restarting => write!(f, "restarting"),
            ContainerStatus::Exited => write!(f, "exited"),
            ContainerStatus::Ghost => write!(f, "ghost"),
        }
    }
}

/// Process state of an inspected container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct State {
    pub running: bool,
    pub paused: bool,
    pub restarting: bool,
    pub pid: i64,
    /// Only meaningful once the container is no longer running
    pub exit_code: i32,
    #[serde(with = "zero_time")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(with = "zero_time")]
    pub finished_at: Option<DateTime<Utc>>,
    pub ghost: bool,
}

impl State {
    pub fn status(&self) -> ContainerStatus {
        if self.ghost {
            ContainerStatus::Ghost
        } else if self.restarting {
            ContainerStatus::Restarting
        } else if self.paused {
            ContainerStatus::Paused
        } else if self.running {
            ContainerStatus::Running
        } else if self.started_at.is_some() {
            ContainerStatus::Exited
        } else {
            ContainerStatus::Created
        }
    }

    /// Exit code, only once the container has stopped running
    pub fn exit_code(&self) -> Option<i32> {
        (!self.running).then_some(self.exit_code)
    }
}

/// Network attachment of an inspected container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkSettings {
    #[serde(alias = "IPAddress")]
    pub ip_address: String,
    #[serde(alias = "IPPrefixLen")]
    pub ip_prefix_len: i64,
    pub gateway: String,
    pub bridge: String,
    /// Exposed port spec to host bindings; `None` when exposed but unpublished
    #[serde(deserialize_with = "null_as_default")]
    pub ports: BTreeMap<String, Option<Vec<PortBinding>>>,
}

impl NetworkSettings {
    /// Host bindings published for a container port spec
    pub fn bindings(&self, port_spec: &str) -> &[PortBinding] {
        self.ports
            .get(port_spec)
            .and_then(|b| b.as_deref())
            .unwrap_or(&[])
    }
}

/// Full inspection result for one container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerInfo {
    pub id: String,
    /// Daemon-formatted creation time, kept verbatim
    pub created: String,
    pub path: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub args: Vec<String>,
    #[serde(rename = "ExecIDs", deserialize_with = "null_as_default")]
    pub exec_ids: Vec<String>,
    /// Read back without the create-only host configuration
    #[serde(deserialize_with = "inspected_config", skip_serializing_if = "Option::is_none")]
    pub config: Option<ContainerConfig>,
    pub state: State,
    pub image: String,
    pub network_settings: NetworkSettings,
    pub sys_init_path: String,
    pub resolv_conf_path: String,
    /// Container path to host path
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_config: Option<HostConfig>,
}

/// `HostConfig` is write-only inside `Config`; drop it on read
fn inspected_config<'de, D>(deserializer: D) -> std::result::Result<Option<ContainerConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let config: Option<ContainerConfig> = Option::deserialize(deserializer)?;
    Ok(config.map(|mut config| {
        config.host_config = None;
        config
    }))
}

impl ContainerInfo {
    /// Name without the daemon's leading slash
    pub fn short_name(&self) -> &str {
        self.name.trim_start_matches('/')
    }

    pub fn status(&self) -> ContainerStatus {
        self.state.status()
    }
}

impl Shape for ContainerInfo {
    const KIND: ShapeKind = ShapeKind::ContainerInfo;

    fn validate(&self) -> Result<()> {
        let shape = Self::KIND.wire_name();
        require(shape, "Id", &self.id)?;
        if self
            .config
            .as_ref()
            .is_some_and(|config| config.host_config.is_some())
        {
            return Err(ApiError::validation(
                shape,
                "Config",
                "must not carry HostConfig in an inspect result",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::construct;
    use serde_json::json;

    fn inspect_payload() -> serde_json::Value {
        json!({
            "Id": "4fa6e0f0c6786287e131c3852c58a2e01cc697a68231826813597e4994f1d6e2",
            "Created": "2015-01-06T15:47:31.485331387Z",
            "Path": "date",
            "Args": [],
            "ExecIDs": null,
            "Config": {
                "Hostname": "4fa6e0f0c678",
                "Image": "ubuntu",
                "Cmd": ["date"],
                "Env": null,
                "HostConfig": {"Memory": 1024}
            },
            "State": {
                "Running": false,
                "Paused": false,
                "Restarting": false,
                "Pid": 0,
                "ExitCode": 0,
                "StartedAt": "2015-01-06T15:47:32.072697474Z",
                "FinishedAt": "2015-01-06T15:47:32.080254511Z",
                "Ghost": false
            },
            "Image": "ubuntu",
            "NetworkSettings": {
                "IPAddress": "172.17.0.5",
                "IPPrefixLen": 16,
                "Gateway": "172.17.42.1",
                "Bridge": "docker0",
                "Ports": {
                    "80/tcp": [{"HostIp": "0.0.0.0", "HostPort": "49153"}],
                    "443/tcp": null
                }
            },
            "SysInitPath": "/usr/bin/docker",
            "ResolvConfPath": "/etc/resolv.conf",
            "Volumes": {},
            "HostConfig": {
                "Binds": null,
                "PortBindings": {"80/tcp": [{"HostIp": "0.0.0.0", "HostPort": "49153"}]},
                "RestartPolicy": {"Name": "always", "MaximumRetryCount": 0}
            }
        })
    }

    #[test]
    fn test_parse_inspect() {
        let info: ContainerInfo = construct(inspect_payload()).unwrap();
        assert_eq!(info.path, "date");
        assert_eq!(info.network_settings.ip_address, "172.17.0.5");
        assert_eq!(info.network_settings.ip_prefix_len, 16);
        assert_eq!(info.network_settings.bindings("80/tcp")[0].host_port, "49153");
        assert!(info.network_settings.bindings("443/tcp").is_empty());
        assert_eq!(info.state.status(), ContainerStatus::Exited);
        assert_eq!(info.state.exit_code(), Some(0));
        assert_eq!(info.created, "2015-01-06T15:47:31.485331387Z");

        let host = info.host_config.as_ref().unwrap();
        assert_eq!(host.restart_policy.name, "always");
    }

    #[test]
    fn test_config_never_carries_host_config() {
        let info: ContainerInfo = construct(inspect_payload()).unwrap();
        let config = info.config.as_ref().unwrap();
        assert_eq!(config.image, "ubuntu");
        assert!(config.host_config.is_none());
    }

    #[test]
    fn test_validate_rejects_embedded_host_config() {
        let mut info: ContainerInfo = construct(inspect_payload()).unwrap();
        info.config = Some(ContainerConfig::new("ubuntu").host_config(HostConfig::new()));
        assert!(info.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_inspect_round_trip() {
        let info: ContainerInfo = construct(inspect_payload()).unwrap();
        let again: ContainerInfo = construct(serde_json::to_value(&info).unwrap()).unwrap();
        assert_eq!(again, info);
    }

    #[test]
    fn test_never_started_container() {
        let info: ContainerInfo = construct(json!({
            "Id": "abc",
            "State": {"StartedAt": "0001-01-01T00:00:00Z", "FinishedAt": "0001-01-01T00:00:00Z"}
        }))
        .unwrap();
        assert_eq!(info.state.started_at, None);
        assert_eq!(info.status(), ContainerStatus::Created);
    }

    #[test]
    fn test_exit_code_hidden_while_running() {
        let state = State {
            running: true,
            pid: 4242,
            exit_code: 137,
            ..State::default()
        };
        assert_eq!(state.status(), ContainerStatus::Running);
        assert_eq!(state.exit_code(), None);
    }

    #[test]
    fn test_ghost_state() {
        let state = State {
            running: true,
            ghost: true,
            ..State::default()
        };
        assert_eq!(state.status(), ContainerStatus::Ghost);
    }

    #[test]
    fn test_id_required() {
        let err = construct::<ContainerInfo>(json!({"Name": "/web"})).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_short_name() {
        let info = ContainerInfo {
            id: "abc".to_string(),
            name: "/web".to_string(),
            ..ContainerInfo::default()
        };
        assert_eq!(info.short_name(), "web");
    }
}

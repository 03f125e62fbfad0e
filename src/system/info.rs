//! Daemon status and version

use crate::config::ApiVersion;
use crate::error::Result;
use crate::shape::{Shape, ShapeKind};
use crate::time::null_as_default;
use serde::{Deserialize, Serialize};

/// Daemon-wide status snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Info {
    #[serde(rename = "ID")]
    pub id: String,
    pub containers: i64,
    pub docker_root_dir: String,
    /// Storage driver name
    pub driver: String,
    /// Storage driver status as `[key, value]` rows
    #[serde(deserialize_with = "null_as_default")]
    pub driver_status: Vec<Vec<String>>,
    pub execution_driver: String,
    pub images: i64,
    pub kernel_version: String,
    pub operating_system: String,
    #[serde(rename = "NCPU")]
    pub ncpu: i64,
    /// Bytes of memory on the host
    pub mem_total: i64,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
}

impl Info {
    /// Storage driver status rows as key/value pairs; malformed rows are skipped
    pub fn driver_status_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.driver_status.iter().filter_map(|row| match row.as_slice() {
            [key, value] => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }
}

impl Shape for Info {
    const KIND: ShapeKind = ShapeKind::Info;
}

/// Daemon version report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Version {
    pub version: String,
    pub git_commit: String,
    pub go_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub os: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub arch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kernel_version: String,
}

impl Version {
    /// Highest API version the daemon speaks, when reported
    pub fn api(&self) -> Option<Result<ApiVersion>> {
        (!self.api_version.is_empty()).then(|| self.api_version.parse())
    }
}

impl Shape for Version {
    const KIND: ShapeKind = ShapeKind::Version;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::construct;
    use serde_json::json;

    #[test]
    fn test_info() {
        let info: Info = construct(json!({
            "Containers": 11,
            "Images": 16,
            "Driver": "btrfs",
            "DriverStatus": [["Root Dir", "/var/lib/docker/btrfs"], ["Dirs"]],
            "ExecutionDriver": "native-0.1",
            "KernelVersion": "3.12.0-1-amd64",
            "NCPU": 1,
            "MemTotal": 2099236864,
            "Name": "prod-server-42",
            "ID": "7TRN:IPZB:QYBB:VPBQ:UWYA:5OQQ:64WF:A6DV:UQNP:7X32:TUIY:N3GM",
            "Labels": ["storage=ssd"]
        }))
        .unwrap();

        assert_eq!(info.ncpu, 1);
        assert_eq!(
            info.driver_status_pairs().collect::<Vec<_>>(),
            vec![("Root Dir", "/var/lib/docker/btrfs")]
        );
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["NCPU"], 1);
        assert!(value["ID"].as_str().unwrap().starts_with("7TRN"));
    }

    #[test]
    fn test_version() {
        let version: Version = construct(json!({
            "Version": "1.6.0",
            "GitCommit": "4749651",
            "GoVersion": "go1.4.2",
            "ApiVersion": "1.18",
            "Os": "linux",
            "Arch": "amd64"
        }))
        .unwrap();
        assert_eq!(version.api().unwrap().unwrap(), ApiVersion::new(1, 18));

        let old: Version = construct(json!({"Version": "0.9.0"})).unwrap();
        assert!(old.api().is_none());
        assert_eq!(
            serde_json::to_value(&old).unwrap(),
            json!({"Version": "0.9.0", "GitCommit": "", "GoVersion": ""})
        );
    }
}

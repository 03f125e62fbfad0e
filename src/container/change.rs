//! Container filesystem diff entries

use crate::error::{require, ApiError, Result};
use crate::shape::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of filesystem change, sent as a small integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ChangeType {
    #[default]
    Modify,
    Add,
    Delete,
}

impl TryFrom<i64> for ChangeType {
    type Error = ApiError;

    fn try_from(raw: i64) -> Result<Self> {
        match raw {
            0 => Ok(ChangeType::Modify),
            1 => Ok(ChangeType::Add),
            2 => Ok(ChangeType::Delete),
            other => Err(ApiError::validation(
                "ContainerChange",
                "Kind",
                format!("{} is not 0 (Modify), 1 (Add) or 2 (Delete)", other),
            )),
        }
    }
}

impl From<ChangeType> for i64 {
    fn from(kind: ChangeType) -> Self {
        match kind {
            ChangeType::Modify => 0,
            ChangeType::Add => 1,
            ChangeType::Delete => 2,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Modify => write!(f, "C"),
            ChangeType::Add => write!(f, "A"),
            ChangeType::Delete => write!(f, "D"),
        }
    }
}

/// One entry of a container filesystem diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerChange {
    pub kind: ChangeType,
    pub path: String,
}

impl ContainerChange {
    pub fn new(kind: ChangeType, path: &str) -> Self {
        Self {
            kind,
            path: path.to_string(),
        }
    }
}

impl fmt::Display for ContainerChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

impl Shape for ContainerChange {
    const KIND: ShapeKind = ShapeKind::ContainerChange;

    fn check_fields(fields: &Value) -> Result<()> {
        match fields.get("Kind") {
            Some(kind) if kind.is_number() => {
                let raw = kind.as_i64().ok_or_else(|| {
                    ApiError::validation(
                        Self::KIND.wire_name(),
                        "Kind",
                        format!("{} is not 0 (Modify), 1 (Add) or 2 (Delete)", kind),
                    )
                })?;
                ChangeType::try_from(raw).map(|_| ())
            }
            // No zero value stands in for a missing Kind
            None | Some(Value::Null) => Err(ApiError::validation(
                Self::KIND.wire_name(),
                "Kind",
                "is required",
            )),
            _ => Ok(()),
        }
    }

    fn validate(&self) -> Result<()> {
        require(Self::KIND.wire_name(), "Path", &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::construct;
    use serde_json::json;

    #[test]
    fn test_kind_wire_values() {
        let changes: Vec<ContainerChange> = serde_json::from_value(json!([
            {"Kind": 0, "Path": "/dev"},
            {"Kind": 1, "Path": "/dev/kmsg"},
            {"Kind": 2, "Path": "/tmp/old"}
        ]))
        .unwrap();
        assert_eq!(changes[0].kind, ChangeType::Modify);
        assert_eq!(changes[1].kind, ChangeType::Add);
        assert_eq!(changes[2].kind, ChangeType::Delete);

        let value = serde_json::to_value(ContainerChange::new(ChangeType::Delete, "/x")).unwrap();
        assert_eq!(value, json!({"Kind": 2, "Path": "/x"}));
    }

    #[test]
    fn test_kind_outside_set() {
        let err = construct::<ContainerChange>(json!({"Kind": 3, "Path": "/x"})).unwrap_err();
        assert!(err.is_validation());
        let err = construct::<ContainerChange>(json!({"Kind": -1, "Path": "/x"})).unwrap_err();
        assert!(err.is_validation());
        assert!(ChangeType::try_from(3).is_err());
    }

    #[test]
    fn test_kind_wrong_type() {
        let err = construct::<ContainerChange>(json!({"Kind": "A", "Path": "/x"})).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_diff_display() {
        let change = ContainerChange::new(ChangeType::Add, "/etc/motd");
        assert_eq!(change.to_string(), "A /etc/motd");
    }

    #[test]
    fn test_kind_required() {
        let err = construct::<ContainerChange>(json!({"Path": "/x"})).unwrap_err();
        assert!(err.is_validation());
        let err = construct::<ContainerChange>(json!({"Kind": null, "Path": "/x"})).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_path_required() {
        let err = construct::<ContainerChange>(json!({"Kind": 0, "Path": ""})).unwrap_err();
        assert!(err.is_validation());
        let err = construct::<ContainerChange>(json!({"Kind": 1})).unwrap_err();
        assert!(err.is_validation());
    }
}

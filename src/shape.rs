//! Contract shapes
//!
//! Every request and response payload implements [`Shape`]. Values are built
//! from raw wire fields with [`construct`], which rejects out-of-set values and
//! missing required fields, or start from [`Default`] and are filled in by the
//! caller before being sent.

use crate::container::{
    AttachOptions, Container, ContainerChange, ContainerConfig, ContainerInfo, ExecConfig,
    HostConfig, LogConfig, LogOptions, Port, PortBinding, RespContainersCreate, RestartPolicy,
};
use crate::error::{ApiError, Result};
use crate::image::{CommitOptions, Image, ImageDelete, ImageInfo, ImageLayer, TagOptions};
use crate::system::{Event, Info, Version};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A named request or response payload
pub trait Shape: Serialize + DeserializeOwned + Default + Clone + PartialEq + fmt::Debug {
    /// Which shape this is
    const KIND: ShapeKind;

    /// Check closed-set fields on the raw payload, before it is decoded
    fn check_fields(_fields: &Value) -> Result<()> {
        Ok(())
    }

    /// Check required fields and cross-field rules of a decoded value
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Build a shape from its wire fields
pub fn construct<T: Shape>(fields: Value) -> Result<T> {
    let checked = T::check_fields(&fields)
        .and_then(|()| serde_json::from_value::<T>(fields).map_err(ApiError::from))
        .and_then(|value| value.validate().map(|()| value));

    if let Err(e) = &checked {
        warn!("Rejected {} payload: {}", T::KIND, e);
    }
    checked
}

macro_rules! shapes {
    ($($variant:ident => $ty:ty, $name:literal;)+) => {
        /// Closed set of contract shape names
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ShapeKind {
            $($variant,)+
        }

        impl ShapeKind {
            /// Every shape kind, in declaration order
            pub const ALL: &'static [ShapeKind] = &[$(ShapeKind::$variant,)+];

            /// Kebab-case name, e.g. `container-config`
            pub const fn name(self) -> &'static str {
                match self {
                    $(ShapeKind::$variant => $name,)+
                }
            }

            /// Type name as used by the daemon's documentation
            pub const fn wire_name(self) -> &'static str {
                match self {
                    $(ShapeKind::$variant => stringify!($variant),)+
                }
            }
        }

        /// Any contract shape
        #[derive(Debug, Clone, PartialEq)]
        pub enum Contract {
            $($variant($ty),)+
        }

        impl Contract {
            /// Build the shape named by `kind` from its wire fields
            pub fn construct(kind: ShapeKind, fields: Value) -> Result<Self> {
                match kind {
                    $(ShapeKind::$variant => construct::<$ty>(fields).map(Contract::$variant),)+
                }
            }

            /// Zero-value form of the shape named by `kind`
            pub fn default_for(kind: ShapeKind) -> Self {
                match kind {
                    $(ShapeKind::$variant => Contract::$variant(<$ty>::default()),)+
                }
            }

            pub fn kind(&self) -> ShapeKind {
                match self {
                    $(Contract::$variant(_) => ShapeKind::$variant,)+
                }
            }

            pub fn validate(&self) -> Result<()> {
                match self {
                    $(Contract::$variant(shape) => shape.validate(),)+
                }
            }

            /// Wire form of the wrapped shape
            pub fn to_value(&self) -> Result<Value> {
                match self {
                    $(Contract::$variant(shape) => Ok(serde_json::to_value(shape)?),)+
                }
            }
        }

        $(
            impl From<$ty> for Contract {
                fn from(shape: $ty) -> Self {
                    Contract::$variant(shape)
                }
            }
        )+
    };
}

shapes! {
    ContainerConfig => ContainerConfig, "container-config";
    HostConfig => HostConfig, "host-config";
    LogConfig => LogConfig, "log-config";
    ExecConfig => ExecConfig, "exec-config";
    LogOptions => LogOptions, "log-options";
    RestartPolicy => RestartPolicy, "restart-policy";
    PortBinding => PortBinding, "port-binding";
    ContainerInfo => ContainerInfo, "container-info";
    Port => Port, "port";
    Container => Container, "container";
    Event => Event, "event";
    Version => Version, "version";
    RespContainersCreate => RespContainersCreate, "containers-create-response";
    Image => Image, "image";
    ImageLayer => ImageLayer, "image-layer";
    ImageInfo => ImageInfo, "image-info";
    Info => Info, "info";
    ImageDelete => ImageDelete, "image-delete";
    AttachOptions => AttachOptions, "attach-options";
    CommitOptions => CommitOptions, "commit-options";
    ContainerChange => ContainerChange, "container-change";
    TagOptions => TagOptions, "tag-options";
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ShapeKind {
    type Err = ApiError;

    /// Accepts either the kebab-case name or the wire type name
    fn from_str(s: &str) -> Result<Self> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s || kind.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ApiError::InvalidConfig(format!("Unknown shape kind: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ChangeType;
    use serde_json::json;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>().unwrap(), *kind);
            assert_eq!(kind.wire_name().parse::<ShapeKind>().unwrap(), *kind);
        }
        assert!("container-spec".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_default_for_every_kind() {
        for kind in ShapeKind::ALL {
            let shape = Contract::default_for(*kind);
            assert_eq!(shape.kind(), *kind);
            assert!(shape.to_value().is_ok());
        }
    }

    #[test]
    fn test_construct_by_kind() {
        let shape = Contract::construct(
            ShapeKind::ContainerChange,
            json!({"Kind": 1, "Path": "/etc/hosts"}),
        )
        .unwrap();

        match shape {
            Contract::ContainerChange(change) => {
                assert_eq!(change.kind, ChangeType::Add);
                assert_eq!(change.path, "/etc/hosts");
            }
            other => panic!("unexpected shape {:?}", other.kind()),
        }
    }

    #[test]
    fn test_change_kind_outside_set_is_validation_error() {
        let err = Contract::construct(
            ShapeKind::ContainerChange,
            json!({"Kind": 3, "Path": "/x"}),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_wrong_field_type_is_serialization_error() {
        let err = construct::<Container>(json!({"Id": "abc", "Created": "yesterday"})).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_missing_required_field_is_validation_error() {
        let err = construct::<RespContainersCreate>(json!({"Warnings": []})).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_round_trip_through_contract() {
        let config = ContainerConfig::new("busybox:latest").cmd(["echo", "hi"]);
        let shape = Contract::from(config.clone());
        let rebuilt = Contract::construct(shape.kind(), shape.to_value().unwrap()).unwrap();
        assert_eq!(rebuilt, Contract::ContainerConfig(config));
    }
}

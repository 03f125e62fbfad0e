//! Container contract shapes
//!
//! Requests sent to create and exec in containers, the parameters for logs and
//! attach, and the daemon's list, inspect and diff responses.

pub mod change;
pub mod config;
pub mod exec;
pub mod inspect;
pub mod options;
pub mod summary;

pub use change::{ChangeType, ContainerChange};
pub use config::{ContainerConfig, HostConfig, LogConfig, PortBinding, RestartPolicy};
pub use exec::ExecConfig;
pub use inspect::{ContainerInfo, ContainerStatus, NetworkSettings, State};
pub use options::{AttachOptions, LogOptions, Tail};
pub use summary::{Container, Port, RespContainersCreate};

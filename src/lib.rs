//! Rune API - typed Docker Engine API contract shapes
//!
//! This crate declares the request and response payloads exchanged with a
//! Docker-compatible daemon, with field-exact wire names. It provides:
//!
//! - Container, image and system shapes
//! - Construction from raw wire fields with validation
//! - Zero-value defaults for every shape
//! - JSON encoding, list decoding and event stream decoding
//!
//! HTTP transport, authentication and streaming mechanics are left to the caller.

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod image;
pub mod query;
pub mod set;
pub mod shape;
pub mod system;
pub mod time;

pub use config::{ApiConfig, ApiVersion};
pub use error::{ApiError, Result};
pub use query::QueryParams;
pub use set::KeySet;
pub use shape::{construct, Contract, Shape, ShapeKind};

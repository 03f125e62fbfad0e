//! Daemon-level contract shapes: status, version and events

pub mod event;
pub mod info;

pub use event::Event;
pub use info::{Info, Version};
